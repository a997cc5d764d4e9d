//! Collaborator traits for the remote lookups.
//!
//! The status engine only talks to these traits. `tend-github` implements
//! [`RepoApi`] and `tend-registry` implements [`PackageApi`]; tests use
//! in-memory stubs.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::sources::{
    CiStatus, Commit, CommitSha, FullRepository, PackageManifest, Packument, RawIssueOrPr,
    WorkspaceRepository,
};

/// Lookups against the version-control host.
#[async_trait]
pub trait RepoApi: Send + Sync {
    /// Latest commit of the repository, limited to `path` when given.
    async fn commit(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Commit, SourceError>;

    async fn repository(&self, owner: &str, name: &str) -> Result<FullRepository, SourceError>;

    /// Restricted repository lookup for workspace projects.
    ///
    /// Defaults to projecting the full lookup down to
    /// [`WorkspaceRepository`].
    async fn workspace_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<WorkspaceRepository, SourceError> {
        self.repository(owner, name)
            .await
            .map(WorkspaceRepository::from)
    }

    /// Combined CI outcome for a commit; `None` when nothing ran.
    async fn status(
        &self,
        owner: &str,
        name: &str,
        sha: &CommitSha,
    ) -> Result<Option<CiStatus>, SourceError>;

    /// Every open issue and pull request, in listing order.
    async fn open_issues_and_prs(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<RawIssueOrPr>, SourceError>;

    /// `package.json` at `path` (or the repository root); `None` when the
    /// file does not exist.
    async fn repo_manifest(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Option<PackageManifest>, SourceError>;
}

/// Lookups against the package registry, addressed by registry identifier.
#[async_trait]
pub trait PackageApi: Send + Sync {
    /// Manifest of the latest published version, with full metadata.
    async fn manifest(&self, pkg: &str) -> Result<PackageManifest, SourceError>;

    async fn packument(&self, pkg: &str) -> Result<Packument, SourceError>;

    async fn downloads(&self, pkg: &str) -> Result<u64, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct OnlyFull;

    #[async_trait]
    impl RepoApi for OnlyFull {
        async fn commit(
            &self,
            _owner: &str,
            _name: &str,
            _path: Option<&str>,
        ) -> Result<Commit, SourceError> {
            Err(SourceError::NotFound("commit".to_string()))
        }

        async fn repository(
            &self,
            _owner: &str,
            name: &str,
        ) -> Result<FullRepository, SourceError> {
            Ok(FullRepository {
                default_branch: "main".to_string(),
                html_url: format!("https://github.com/o/{name}"),
                archived: true,
                stargazers_count: Some(5),
                license_spdx_id: Some("MIT".to_string()),
            })
        }

        async fn status(
            &self,
            _owner: &str,
            _name: &str,
            _sha: &CommitSha,
        ) -> Result<Option<CiStatus>, SourceError> {
            Ok(None)
        }

        async fn open_issues_and_prs(
            &self,
            _owner: &str,
            _name: &str,
        ) -> Result<Vec<RawIssueOrPr>, SourceError> {
            Ok(Vec::new())
        }

        async fn repo_manifest(
            &self,
            _owner: &str,
            _name: &str,
            _path: Option<&str>,
        ) -> Result<Option<PackageManifest>, SourceError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn workspace_repository_defaults_to_projection() {
        let repo = OnlyFull.workspace_repository("o", "r").await.unwrap();
        assert_eq!(
            repo,
            WorkspaceRepository {
                default_branch: "main".to_string(),
                html_url: "https://github.com/o/r".to_string(),
                archived: true,
            }
        );
    }
}
