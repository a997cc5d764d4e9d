//! GitHub client error types.

use tend_core::errors::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The addressed repository, commit, or file does not exist.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Primary or secondary rate limit hit.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The repository (or the path inside it) has no commits.
    #[error("no commits found for {resource}")]
    NoCommits { resource: String },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<GithubError> for SourceError {
    fn from(error: GithubError) -> Self {
        match error {
            GithubError::NotFound { resource } | GithubError::NoCommits { resource } => {
                Self::NotFound(resource)
            }
            GithubError::RateLimited { retry_after_secs } => {
                Self::RateLimited { retry_after_secs }
            }
            GithubError::Parse(message) => Self::Invalid(message),
            other @ (GithubError::Http(_) | GithubError::Api { .. }) => {
                Self::Other(anyhow::Error::new(other))
            }
        }
    }
}
