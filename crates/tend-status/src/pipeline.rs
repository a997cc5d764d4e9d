//! End-to-end record building for one project.
//!
//! Two stages run strictly in order: the selected lookups are fanned out
//! and joined, then the CI status lookup runs against the commit SHA the
//! first stage produced. Any failure in either stage means no record.

use std::sync::Arc;

use tend_core::api::{PackageApi, RepoApi};
use tend_core::project::{HistoryEntry, ProjectDescriptor};
use tend_core::record::StatusRecord;
use tend_core::sources::{Commit, CommitSha, ManifestSource, Packument, Repository};

use crate::classify::Backlog;
use crate::error::StatusError;
use crate::fanout::Settled;
use crate::projection::{BacklogProjection, SummaryProjection};
use crate::resolve::{Sources, resolve};
use crate::selector::{Fetched, Task, select};
use crate::urls::Links;

/// Builds [`StatusRecord`]s from the two lookup collaborators.
#[derive(Clone)]
pub struct StatusBuilder {
    repos: Arc<dyn RepoApi>,
    packages: Arc<dyn PackageApi>,
    projection: Arc<dyn BacklogProjection>,
    links: Links,
}

impl StatusBuilder {
    pub fn new(repos: Arc<dyn RepoApi>, packages: Arc<dyn PackageApi>) -> Self {
        Self {
            repos,
            packages,
            projection: Arc::new(SummaryProjection),
            links: Links::default(),
        }
    }

    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }

    #[must_use]
    pub fn with_projection(mut self, projection: Arc<dyn BacklogProjection>) -> Self {
        self.projection = projection;
        self
    }

    /// Build the record for `project`.
    ///
    /// `history` holds prior snapshots of the same project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::SourceUnavailable`] when any batched lookup
    /// fails and [`StatusError::StatusUnavailable`] when the CI status
    /// lookup fails.
    #[tracing::instrument(skip_all, fields(project = %project.id))]
    pub async fn build(
        &self,
        project: &ProjectDescriptor,
        history: &[HistoryEntry],
    ) -> Result<StatusRecord, StatusError> {
        let batch = select(project, self.repos.as_ref(), self.packages.as_ref());
        let settled = batch
            .join()
            .await
            .map_err(|failed| StatusError::SourceUnavailable {
                project: project.id.clone(),
                lookup: failed.task,
                source: failed.source,
            })?;
        tracing::debug!(results = settled.len(), "batch settled");
        let batch = Batch::from_settled(project, settled)?;

        let sha = CommitSha::from(&batch.commit);
        tracing::debug!(sha = %sha, "looking up ci status");
        let status = self
            .repos
            .status(&project.owner, &project.name, &sha)
            .await
            .map_err(|source| StatusError::StatusUnavailable {
                project: project.id.clone(),
                sha: sha.to_string(),
                source,
            })?;

        let sources = Sources {
            commit: batch.commit,
            repository: batch.repository,
            manifest: batch.manifest,
            packument: batch.packument,
            downloads: batch.downloads,
            backlog: batch.backlog,
            status,
        };
        let record = resolve(project, sources, history, &self.links, self.projection.as_ref());
        tracing::info!(
            archived = record.archived,
            published = project.is_published(),
            "built status record"
        );
        Ok(record)
    }
}

/// Typed view of a settled batch.
struct Batch {
    commit: Commit,
    repository: Repository,
    manifest: ManifestSource,
    packument: Option<Packument>,
    downloads: Option<u64>,
    backlog: Option<Backlog>,
}

impl Batch {
    fn from_settled(
        project: &ProjectDescriptor,
        mut settled: Settled<Task, Fetched>,
    ) -> Result<Self, StatusError> {
        let missing = |lookup| StatusError::MissingResult {
            project: project.id.clone(),
            lookup,
        };

        let commit = settled
            .take(&Task::Commit)
            .and_then(Fetched::into_commit)
            .ok_or_else(|| missing(Task::Commit))?;

        let repository_task = if project.is_workspace() {
            Task::WorkspaceRepository
        } else {
            Task::FullRepository
        };
        let repository = settled
            .take(&repository_task)
            .and_then(Fetched::into_repository)
            .ok_or_else(|| missing(repository_task))?;

        let manifest = match settled.take(&Task::RegistryManifest) {
            Some(fetched) => fetched
                .into_manifest()
                .ok_or_else(|| missing(Task::RegistryManifest))?,
            None => settled
                .take(&Task::RepoManifest)
                .and_then(Fetched::into_manifest)
                .ok_or_else(|| missing(Task::RepoManifest))?,
        };

        let backlog = settled
            .take(&Task::IssuesAndPrs)
            .map(|fetched| {
                fetched
                    .into_issues_and_prs()
                    .ok_or_else(|| missing(Task::IssuesAndPrs))
            })
            .transpose()?
            .map(Backlog::classify);

        Ok(Self {
            commit,
            repository,
            manifest,
            packument: settled.take(&Task::Packument).and_then(Fetched::into_packument),
            downloads: settled.take(&Task::Downloads).and_then(Fetched::into_downloads),
            backlog,
        })
    }
}
