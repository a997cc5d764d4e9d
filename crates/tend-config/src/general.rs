//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of projects processed at once.
const fn default_concurrency() -> usize {
    4
}

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How many projects are built concurrently by `tend status`.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout for the HTTP clients.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
