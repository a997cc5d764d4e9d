//! Registry error types.

use tend_core::errors::SourceError;
use thiserror::Error;

/// Errors that can occur when interacting with the package registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registry.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The package does not exist in the registry.
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// The packument has no `latest` dist-tag or no matching version entry.
    #[error("package {0} has no latest version")]
    NoLatestVersion(String),

    /// Failed to parse a registry response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<RegistryError> for SourceError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::PackageNotFound(name) => Self::NotFound(format!("package {name}")),
            RegistryError::RateLimited { retry_after_secs } => {
                Self::RateLimited { retry_after_secs }
            }
            RegistryError::Parse(message) => Self::Invalid(message),
            other @ (RegistryError::Http(_)
            | RegistryError::Api { .. }
            | RegistryError::NoLatestVersion(_)) => Self::Other(anyhow::Error::new(other)),
        }
    }
}
