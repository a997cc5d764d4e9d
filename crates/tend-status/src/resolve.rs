//! Field-by-field precedence across the settled sources.
//!
//! Each field has one total function over its candidate sources; absent
//! sources fall through to the next candidate or to the field's neutral
//! value. Identity fields come from the descriptor only.

use tend_core::project::{HistoryEntry, ProjectDescriptor};
use tend_core::record::{LastPush, StatusLink, StatusRecord, Stars};
use tend_core::sources::{
    CiStatus, Commit, Deprecation, ManifestSource, PackageManifest, Packument, Repository,
};

use crate::classify::Backlog;
use crate::coverage::coverage;
use crate::projection::{BacklogKind, BacklogProjection};
use crate::release::pending_release;
use crate::urls::{Links, RepoUrls};

/// License value some hosts report when they cannot detect one.
pub const NO_ASSERTION: &str = "NOASSERTION";

/// Everything the lookups produced for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub commit: Commit,
    pub repository: Repository,
    pub manifest: ManifestSource,
    pub packument: Option<Packument>,
    pub downloads: Option<u64>,
    /// Classified open items; `None` for workspace projects.
    pub backlog: Option<Backlog>,
    pub status: Option<CiStatus>,
}

fn usable_license(license: Option<&str>) -> Option<&str> {
    license.filter(|l| !l.trim().is_empty() && *l != NO_ASSERTION)
}

/// Selected manifest license, else the repository's detected SPDX id.
#[must_use]
pub fn license(selected: Option<&PackageManifest>, repository: &Repository) -> Option<String> {
    usable_license(selected.and_then(|m| m.license.as_deref()))
        .or_else(|| usable_license(repository.license_spdx_id()))
        .map(str::to_string)
}

/// Published version; in-repo manifests never supply one.
#[must_use]
pub fn version(manifest: &ManifestSource) -> Option<String> {
    manifest.published()?.version.clone()
}

#[must_use]
pub fn last_published(
    packument: Option<&Packument>,
    version: Option<&str>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    packument?.published_at(version?)
}

#[must_use]
pub fn size(manifest: &ManifestSource) -> Option<u64> {
    manifest.published()?.unpacked_size()
}

#[must_use]
pub fn pkg_url(manifest: &ManifestSource, links: &Links) -> Option<String> {
    let name = manifest.published()?.name.as_deref()?;
    Some(links.package(name))
}

#[must_use]
pub fn deprecated(selected: Option<&PackageManifest>) -> Deprecation {
    selected
        .and_then(|m| m.deprecated.clone())
        .unwrap_or_default()
}

/// Only a numeric star count produces a stars link.
#[must_use]
pub fn stars(repository: &Repository, urls: &RepoUrls) -> Option<Stars> {
    repository.stargazers_count().map(|count| Stars {
        count,
        url: urls.stargazers(),
    })
}

#[must_use]
pub fn status(ci: Option<CiStatus>, urls: &RepoUrls) -> Option<StatusLink> {
    let ci = ci?;
    Some(StatusLink {
        url: ci.url.unwrap_or_else(|| urls.actions()),
        conclusion: ci.conclusion,
    })
}

/// Merge `sources` into the record for `project`.
#[must_use]
pub fn resolve(
    project: &ProjectDescriptor,
    sources: Sources,
    history: &[HistoryEntry],
    links: &Links,
    projection: &dyn BacklogProjection,
) -> StatusRecord {
    let Sources {
        commit,
        repository,
        manifest,
        packument,
        downloads,
        backlog,
        status: ci,
    } = sources;

    let urls = links.repo(
        &project.owner,
        &project.name,
        project.path.as_deref(),
        repository.default_branch(),
    );
    let selected = manifest.selected();
    let version = version(&manifest);

    let (prs, issues) = match backlog {
        Some(Backlog { prs, issues }) => (Some(prs), Some(issues)),
        None => (None, None),
    };
    let prs_history: Vec<_> = history.iter().map(|h| h.prs.as_ref()).collect();
    let issues_history: Vec<_> = history.iter().map(|h| h.issues.as_ref()).collect();
    let html_url = repository.html_url();

    StatusRecord {
        id: project.id.clone(),
        name: project.name.clone(),
        owner: project.owner.clone(),
        path: project.path.clone(),

        default_branch: repository.default_branch().to_string(),
        url: urls.full.clone(),
        last_push: LastPush {
            date: commit.date,
            url: commit.html_url,
        },
        archived: repository.archived(),
        status: status(ci, &urls),
        stars: stars(&repository, &urls),

        pkg_private: selected.is_some_and(|m| m.private),
        pkg_name: selected.and_then(|m| m.name.clone()),
        coverage: selected.and_then(coverage),
        template_version: selected.and_then(|m| m.template_version().map(str::to_string)),
        license: license(selected, &repository),
        node: selected.and_then(|m| m.node_engine().map(str::to_string)),

        last_published: last_published(packument.as_ref(), version.as_deref()),
        version,
        size: size(&manifest),
        pkg_url: pkg_url(&manifest, links),
        deprecated: deprecated(selected),
        downloads,

        pending_release: pending_release(prs.as_deref()),
        prs: projection.project(
            BacklogKind::PullRequests,
            prs.as_deref(),
            html_url,
            &prs_history,
        ),
        issues: projection.project(
            BacklogKind::Issues,
            issues.as_deref(),
            html_url,
            &issues_history,
        ),
    }
}
