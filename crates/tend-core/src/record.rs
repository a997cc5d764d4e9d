//! The flat status record emitted per project.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sources::Deprecation;

/// One project's merged status, ready for the dashboard.
///
/// Every field is independently nullable; nothing is skipped on
/// serialization so consumers always see the same key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    // identity, copied from the descriptor
    pub id: String,
    pub name: String,
    pub owner: String,
    pub path: Option<String>,

    // repository
    pub default_branch: String,
    /// Repository URL, scoped to the workspace directory when `path` is set.
    pub url: String,
    pub last_push: LastPush,
    pub archived: bool,
    pub status: Option<StatusLink>,
    pub stars: Option<Stars>,

    // selected manifest
    pub pkg_private: bool,
    pub pkg_name: Option<String>,
    pub coverage: Option<u32>,
    pub template_version: Option<String>,
    pub license: Option<String>,
    pub node: Option<String>,

    // registry
    pub version: Option<String>,
    pub last_published: Option<DateTime<Utc>>,
    pub size: Option<u64>,
    pub pkg_url: Option<String>,
    pub deprecated: Deprecation,
    pub downloads: Option<u64>,

    // backlog
    pub pending_release: Option<PendingRelease>,
    pub prs: Option<BacklogSummary>,
    pub issues: Option<BacklogSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPush {
    pub date: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLink {
    pub url: String,
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stars {
    pub count: u64,
    pub url: String,
}

/// An open release pull request waiting to be merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRelease {
    pub url: String,
    pub version: String,
}

/// Display-ready summary of one backlog kind (issues or pull requests).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogSummary {
    pub count: usize,
    /// Link to the filtered list on the host.
    pub url: String,
    /// Open items per label name.
    #[serde(default)]
    pub labels: BTreeMap<String, usize>,
    /// Counts from prior snapshots, oldest first.
    #[serde(default)]
    pub history: Vec<usize>,
}
