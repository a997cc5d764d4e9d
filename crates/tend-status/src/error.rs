use tend_core::errors::SourceError;
use thiserror::Error;

use crate::selector::Task;

/// Why no record could be built for a project.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("{project}: {lookup} lookup failed: {source}")]
    SourceUnavailable {
        project: String,
        lookup: Task,
        #[source]
        source: SourceError,
    },

    #[error("{project}: status lookup for commit {sha} failed: {source}")]
    StatusUnavailable {
        project: String,
        sha: String,
        #[source]
        source: SourceError,
    },

    #[error("{project}: batch settled without a {lookup} result")]
    MissingResult { project: String, lookup: Task },
}

impl StatusError {
    /// Id of the project the error belongs to.
    #[must_use]
    pub fn project(&self) -> &str {
        match self {
            Self::SourceUnavailable { project, .. }
            | Self::StatusUnavailable { project, .. }
            | Self::MissingResult { project, .. } => project,
        }
    }

    /// Whether the failure came from a rate limit on either host.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable {
                source: SourceError::RateLimited { .. },
                ..
            } | Self::StatusUnavailable {
                source: SourceError::RateLimited { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_project_and_lookup() {
        let err = StatusError::SourceUnavailable {
            project: "cli".to_string(),
            lookup: Task::Commit,
            source: SourceError::NotFound("npm/cli".to_string()),
        };
        assert!(err.to_string().starts_with("cli: commit lookup failed"));
        assert_eq!(err.project(), "cli");
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn rate_limit_is_detected_through_status_lookup() {
        let err = StatusError::StatusUnavailable {
            project: "cli".to_string(),
            sha: "abc123".to_string(),
            source: SourceError::RateLimited {
                retry_after_secs: 30,
            },
        };
        assert!(err.is_rate_limited());
    }
}
