//! GitHub API configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// REST API base URL (override for GitHub Enterprise or tests).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Web host used to build repository links in status records.
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Personal access token. Empty means unauthenticated requests.
    #[serde(default)]
    pub token: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            token: String::new(),
        }
    }
}

impl GithubConfig {
    /// Check if a token is available. Unauthenticated clients still work but
    /// hit the low anonymous rate limit quickly.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    /// Token as an option, for clients that take `Option<&str>`.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }
}
