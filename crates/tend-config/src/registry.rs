//! npm registry configuration.

use serde::{Deserialize, Serialize};

/// Download-count windows the npm downloads API accepts.
pub const DOWNLOAD_PERIODS: &[&str] = &["last-day", "last-week", "last-month", "last-year"];

fn default_url() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_downloads_url() -> String {
    "https://api.npmjs.org/downloads".to_string()
}

fn default_website_url() -> String {
    "https://www.npmjs.com".to_string()
}

fn default_downloads_period() -> String {
    "last-week".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Registry base URL serving packuments.
    #[serde(default = "default_url")]
    pub url: String,

    /// Base URL of the downloads API.
    #[serde(default = "default_downloads_url")]
    pub downloads_url: String,

    /// Public website used for `pkgUrl` links.
    #[serde(default = "default_website_url")]
    pub website_url: String,

    /// Download-count window, one of [`DOWNLOAD_PERIODS`].
    #[serde(default = "default_downloads_period")]
    pub downloads_period: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            downloads_url: default_downloads_url(),
            website_url: default_website_url(),
            downloads_period: default_downloads_period(),
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub fn has_valid_period(&self) -> bool {
        DOWNLOAD_PERIODS.contains(&self.downloads_period.as_str())
    }
}
