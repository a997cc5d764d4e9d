//! Decides which lookups a project needs and builds the batch for them.
//!
//! `path` and `pkg` are independent axes:
//!
//! | project      | repository lookup     | backlog | manifest lookups                 |
//! |--------------|-----------------------|---------|----------------------------------|
//! | top-level    | full                  | yes     | in-repo, or registry when `pkg`  |
//! | workspace    | restricted projection | no      | in-repo at `path`, or registry   |
//!
//! `commit` is always requested. The CI status lookup is never part of the
//! batch: it needs the commit SHA the batch produces.

use std::fmt;

use tend_core::api::{PackageApi, RepoApi};
use tend_core::errors::SourceError;
use tend_core::project::ProjectDescriptor;
use tend_core::sources::{Commit, ManifestSource, Packument, RawIssueOrPr, Repository};

use crate::fanout::FanOut;

/// Name of one batched lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    Commit,
    FullRepository,
    WorkspaceRepository,
    IssuesAndPrs,
    RepoManifest,
    RegistryManifest,
    Packument,
    Downloads,
}

impl Task {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::FullRepository => "repository",
            Self::WorkspaceRepository => "workspace repository",
            Self::IssuesAndPrs => "issues and prs",
            Self::RepoManifest => "repository manifest",
            Self::RegistryManifest => "registry manifest",
            Self::Packument => "packument",
            Self::Downloads => "downloads",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value produced by one batched lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Commit(Commit),
    Repository(Repository),
    IssuesAndPrs(Vec<RawIssueOrPr>),
    Manifest(ManifestSource),
    Packument(Packument),
    Downloads(u64),
}

impl Fetched {
    #[must_use]
    pub fn into_commit(self) -> Option<Commit> {
        match self {
            Self::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_repository(self) -> Option<Repository> {
        match self {
            Self::Repository(repo) => Some(repo),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_issues_and_prs(self) -> Option<Vec<RawIssueOrPr>> {
        match self {
            Self::IssuesAndPrs(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_manifest(self) -> Option<ManifestSource> {
        match self {
            Self::Manifest(manifest) => Some(manifest),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_packument(self) -> Option<Packument> {
        match self {
            Self::Packument(packument) => Some(packument),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_downloads(self) -> Option<u64> {
        match self {
            Self::Downloads(count) => Some(count),
            _ => None,
        }
    }
}

/// The batch type the selector builds.
pub type LookupBatch<'a> = FanOut<'a, Task, Fetched, SourceError>;

/// Build the concurrent batch for `project`.
///
/// The returned producers borrow the collaborators and the descriptor;
/// nothing is sent until the batch is joined.
pub fn select<'a>(
    project: &'a ProjectDescriptor,
    repos: &'a dyn RepoApi,
    packages: &'a dyn PackageApi,
) -> LookupBatch<'a> {
    let owner = project.owner.as_str();
    let name = project.name.as_str();
    let path = project.path.as_deref();
    let mut batch = LookupBatch::new();

    batch.insert(Task::Commit, async move {
        repos.commit(owner, name, path).await.map(Fetched::Commit)
    });

    if project.is_workspace() {
        batch.insert(Task::WorkspaceRepository, async move {
            repos
                .workspace_repository(owner, name)
                .await
                .map(|repo| Fetched::Repository(Repository::Workspace(repo)))
        });
    } else {
        batch.insert(Task::FullRepository, async move {
            repos
                .repository(owner, name)
                .await
                .map(|repo| Fetched::Repository(Repository::Full(repo)))
        });
        batch.insert(Task::IssuesAndPrs, async move {
            repos
                .open_issues_and_prs(owner, name)
                .await
                .map(Fetched::IssuesAndPrs)
        });
    }

    match project.pkg.as_deref() {
        Some(pkg) => {
            batch.insert(Task::RegistryManifest, async move {
                packages
                    .manifest(pkg)
                    .await
                    .map(|manifest| Fetched::Manifest(ManifestSource::Registry(manifest)))
            });
            batch.insert(Task::Packument, async move {
                packages.packument(pkg).await.map(Fetched::Packument)
            });
            batch.insert(Task::Downloads, async move {
                packages.downloads(pkg).await.map(Fetched::Downloads)
            });
        }
        None => {
            batch.insert(Task::RepoManifest, async move {
                repos
                    .repo_manifest(owner, name, path)
                    .await
                    .map(|manifest| Fetched::Manifest(ManifestSource::Repository(manifest)))
            });
        }
    }

    tracing::debug!(
        project = %project.id,
        tasks = ?batch.tasks().collect::<Vec<_>>(),
        "selected lookups"
    );
    batch
}
