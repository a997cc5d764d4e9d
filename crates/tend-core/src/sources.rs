//! Domain shapes of the remote lookups.
//!
//! Client crates map their wire payloads into these types, so the status
//! engine never sees raw API responses. Shapes that differ per selection
//! branch are tagged enums ([`Repository`], [`ManifestSource`]) rather than
//! one loose struct with implicitly absent fields.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de;

// ── Commits ────────────────────────────────────────────────────────

/// Latest commit touching the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Author date of the commit.
    pub date: DateTime<Utc>,
    pub html_url: String,
}

/// Commit SHA handed from the fan-out batch to the CI status lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Commit> for CommitSha {
    fn from(commit: &Commit) -> Self {
        Self(commit.sha.clone())
    }
}

impl From<String> for CommitSha {
    fn from(sha: String) -> Self {
        Self(sha)
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Repositories ───────────────────────────────────────────────────

/// Everything the full repository lookup reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullRepository {
    pub default_branch: String,
    pub html_url: String,
    pub archived: bool,
    /// Star count, present only when the host reported a number.
    #[serde(default, deserialize_with = "de::count_or_none")]
    pub stargazers_count: Option<u64>,
    /// SPDX identifier of the detected license.
    #[serde(default)]
    pub license_spdx_id: Option<String>,
}

/// The restricted repository projection used for workspace projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRepository {
    pub default_branch: String,
    pub html_url: String,
    pub archived: bool,
}

impl From<FullRepository> for WorkspaceRepository {
    fn from(repo: FullRepository) -> Self {
        Self {
            default_branch: repo.default_branch,
            html_url: repo.html_url,
            archived: repo.archived,
        }
    }
}

/// Repository result tagged by which lookup produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    Full(FullRepository),
    Workspace(WorkspaceRepository),
}

impl Repository {
    #[must_use]
    pub fn default_branch(&self) -> &str {
        match self {
            Self::Full(repo) => &repo.default_branch,
            Self::Workspace(repo) => &repo.default_branch,
        }
    }

    #[must_use]
    pub fn html_url(&self) -> &str {
        match self {
            Self::Full(repo) => &repo.html_url,
            Self::Workspace(repo) => &repo.html_url,
        }
    }

    #[must_use]
    pub const fn archived(&self) -> bool {
        match self {
            Self::Full(repo) => repo.archived,
            Self::Workspace(repo) => repo.archived,
        }
    }

    /// Star count; always `None` for the workspace projection.
    #[must_use]
    pub const fn stargazers_count(&self) -> Option<u64> {
        match self {
            Self::Full(repo) => repo.stargazers_count,
            Self::Workspace(_) => None,
        }
    }

    /// License identifier; always `None` for the workspace projection.
    #[must_use]
    pub fn license_spdx_id(&self) -> Option<&str> {
        match self {
            Self::Full(repo) => repo.license_spdx_id.as_deref(),
            Self::Workspace(_) => None,
        }
    }
}

// ── CI status ──────────────────────────────────────────────────────

/// Combined CI outcome for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiStatus {
    /// Link to the run details, when the host supplies one.
    #[serde(default)]
    pub url: Option<String>,
    /// `success`, `failure`, `pending`, or `None` while undecided.
    #[serde(default)]
    pub conclusion: Option<String>,
}

// ── Issues and pull requests ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// An open issue or pull request as returned by the combined listing.
///
/// The listing mixes both kinds; the only discriminator is whether the
/// `pull_request` key is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssueOrPr {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_request: Option<Value>,
}

impl RawIssueOrPr {
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

// ── Package manifests ──────────────────────────────────────────────

/// `deprecated` is either a flag or the deprecation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    Flag(bool),
    Message(String),
}

impl Default for Deprecation {
    fn default() -> Self {
        Self::Flag(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOss {
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dist {
    #[serde(default)]
    pub unpacked_size: Option<u64>,
}

/// The subset of `package.json` fields the status record reads.
///
/// Used for both the in-repo manifest and the registry manifest; the
/// registry fills `dist` and sometimes `deprecated`, the repository copy
/// usually does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub private: bool,
    #[serde(default, deserialize_with = "de::license")]
    pub license: Option<String>,
    /// Kept loose: old manifests use an array here.
    #[serde(default)]
    pub engines: Option<Value>,
    #[serde(default, rename = "templateOSS")]
    pub template_oss: Option<TemplateOss>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    #[serde(default)]
    pub dist: Option<Dist>,
    #[serde(default)]
    pub tap: Option<Value>,
    #[serde(default)]
    pub c8: Option<Value>,
}

impl PackageManifest {
    /// The `engines.node` constraint, when written as a string.
    #[must_use]
    pub fn node_engine(&self) -> Option<&str> {
        self.engines.as_ref()?.get("node")?.as_str()
    }

    #[must_use]
    pub fn template_version(&self) -> Option<&str> {
        self.template_oss.as_ref()?.version.as_deref()
    }

    #[must_use]
    pub fn unpacked_size(&self) -> Option<u64> {
        self.dist.as_ref()?.unpacked_size
    }
}

/// Manifest result tagged by where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    /// Published manifest fetched from the package registry.
    Registry(PackageManifest),
    /// `package.json` read from the repository; absent when the file is
    /// missing.
    Repository(Option<PackageManifest>),
}

impl ManifestSource {
    /// Whichever manifest was selected, if one exists.
    #[must_use]
    pub const fn selected(&self) -> Option<&PackageManifest> {
        match self {
            Self::Registry(manifest) => Some(manifest),
            Self::Repository(manifest) => manifest.as_ref(),
        }
    }

    /// The published manifest; `None` for in-repo sources.
    #[must_use]
    pub const fn published(&self) -> Option<&PackageManifest> {
        match self {
            Self::Registry(manifest) => Some(manifest),
            Self::Repository(_) => None,
        }
    }
}

/// Registry publication metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packument {
    /// Publication time per version.
    #[serde(default)]
    pub time: BTreeMap<String, DateTime<Utc>>,
}

impl Packument {
    #[must_use]
    pub fn published_at(&self, version: &str) -> Option<DateTime<Utc>> {
        self.time.get(version).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pull_request_marker_presence_discriminates() {
        let pr: RawIssueOrPr = serde_json::from_str(
            r#"{"number":1,"title":"fix","url":"u","pull_request":{"url":"p"}}"#,
        )
        .unwrap();
        let null_marker: RawIssueOrPr =
            serde_json::from_str(r#"{"number":2,"title":"fix","url":"u","pull_request":null}"#)
                .unwrap();
        let issue: RawIssueOrPr =
            serde_json::from_str(r#"{"number":3,"title":"bug","url":"u"}"#).unwrap();

        assert!(pr.is_pull_request());
        assert!(null_marker.is_pull_request());
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn non_numeric_star_count_is_dropped() {
        let repo: FullRepository = serde_json::from_str(
            r#"{"default_branch":"main","html_url":"h","archived":false,"stargazers_count":"many"}"#,
        )
        .unwrap();
        assert_eq!(repo.stargazers_count, None);
    }

    #[test]
    fn workspace_projection_drops_display_fields() {
        let full = FullRepository {
            default_branch: "latest".to_string(),
            html_url: "https://github.com/npm/cli".to_string(),
            archived: false,
            stargazers_count: Some(8000),
            license_spdx_id: Some("NOASSERTION".to_string()),
        };
        let repo = Repository::Workspace(full.into());
        assert_eq!(repo.default_branch(), "latest");
        assert_eq!(repo.stargazers_count(), None);
        assert_eq!(repo.license_spdx_id(), None);
    }

    #[test]
    fn manifest_reads_nested_fields() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{
                "name": "@npmcli/arborist",
                "version": "7.2.0",
                "license": {"type": "ISC"},
                "private": "true",
                "engines": {"node": "^18.17.0 || >=20.5.0"},
                "templateOSS": {"version": "4.21.3"},
                "dist": {"unpackedSize": 123456},
                "deprecated": "use something else"
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.license.as_deref(), Some("ISC"));
        assert!(manifest.private);
        assert_eq!(manifest.node_engine(), Some("^18.17.0 || >=20.5.0"));
        assert_eq!(manifest.template_version(), Some("4.21.3"));
        assert_eq!(manifest.unpacked_size(), Some(123_456));
        assert_eq!(
            manifest.deprecated,
            Some(Deprecation::Message("use something else".to_string()))
        );
    }

    #[test]
    fn legacy_engines_array_is_tolerated() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"name":"old","engines":["node >= 0.4"]}"#).unwrap();
        assert_eq!(manifest.node_engine(), None);
    }

    #[test]
    fn manifest_source_selection() {
        let manifest = PackageManifest {
            name: Some("pkg".to_string()),
            ..PackageManifest::default()
        };
        let registry = ManifestSource::Registry(manifest.clone());
        let repo = ManifestSource::Repository(Some(manifest));
        let missing = ManifestSource::Repository(None);

        assert!(registry.published().is_some());
        assert!(repo.published().is_none());
        assert!(repo.selected().is_some());
        assert!(missing.selected().is_none());
    }
}
