//! Catalog inputs: project descriptors and history snapshots.

use serde::{Deserialize, Serialize};

use crate::record::BacklogSummary;

/// One maintained project as listed in the catalog.
///
/// The descriptor is the authority for identity: `id`, `owner`, `name` and
/// `path` are copied into the status record verbatim, whatever the remote
/// sources report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub id: String,
    pub owner: String,
    pub name: String,
    /// Sub-directory of the repository for workspace projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Registry identifier for published projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg: Option<String>,
}

impl ProjectDescriptor {
    /// A top-level project with neither a path nor a package.
    #[must_use]
    pub fn new(id: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            name: name.into(),
            path: None,
            pkg: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_pkg(mut self, pkg: impl Into<String>) -> Self {
        self.pkg = Some(pkg.into());
        self
    }

    /// Whether the project lives in a sub-directory of a larger repository.
    #[must_use]
    pub const fn is_workspace(&self) -> bool {
        self.path.is_some()
    }

    /// Whether the project is published to the package registry.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.pkg.is_some()
    }
}

/// A prior snapshot of a project's backlog.
///
/// Snapshots are usually earlier status records; only `prs` and `issues`
/// are read and every other key is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub prs: Option<BacklogSummary>,
    #[serde(default)]
    pub issues: Option<BacklogSummary>,
}
