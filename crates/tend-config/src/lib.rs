//! # tend-config
//!
//! Layered configuration loading for Tend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEND_*` prefix, `__` as separator)
//! 2. Project-level `.tend/config.toml`
//! 3. User-level `~/.config/tend/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEND_GITHUB__TOKEN` -> `github.token`,
//! `TEND_REGISTRY__DOWNLOADS_PERIOD` -> `registry.downloads_period`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tend_config::TendConfig;
//!
//! let config = TendConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if !config.github.is_configured() {
//!     eprintln!("no GitHub token, expect rate limiting");
//! }
//! ```

mod error;
mod general;
mod github;
mod registry;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use github::GithubConfig;
pub use registry::{DOWNLOAD_PERIODS, RegistryConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TendConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TendConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` before building the
    /// figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tend/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TEND_").split("__"))
    }

    /// Reject values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero concurrency or
    /// timeout, or an unknown download period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.general.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.registry.has_valid_period() {
            return Err(ConfigError::InvalidValue {
                field: "registry.downloads_period".to_string(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.registry.downloads_period,
                    DOWNLOAD_PERIODS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tend").join("config.toml"))
    }
}
