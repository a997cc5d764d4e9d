//! Cross-cutting error types for Tend.
//!
//! Every lookup collaborator reports failures as [`SourceError`]. Client
//! crates keep richer error enums of their own (`GithubError`,
//! `RegistryError`) and convert into this type at the trait boundary.

use thiserror::Error;

/// Errors a lookup collaborator can report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote refused the call because of rate limiting.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The remote answered with a shape the lookup cannot use.
    #[error("invalid response: {0}")]
    Invalid(String),

    /// Catch-all for transport and API failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
