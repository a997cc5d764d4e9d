//! Catalog and history files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tend_core::project::{HistoryEntry, ProjectDescriptor};

/// Prior snapshots per project id, oldest first.
pub type History = BTreeMap<String, Vec<HistoryEntry>>;

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<ProjectDescriptor>> {
    let projects: Vec<ProjectDescriptor> = read_json(path, "catalog")?;

    let mut seen = std::collections::BTreeSet::new();
    for project in &projects {
        if !seen.insert(project.id.as_str()) {
            anyhow::bail!(
                "catalog {} lists project id '{}' more than once",
                path.display(),
                project.id
            );
        }
    }
    Ok(projects)
}

pub fn load_history(path: Option<&Path>) -> anyhow::Result<History> {
    path.map_or_else(|| Ok(History::new()), |path| read_json(path, "history"))
}

/// Keep only the projects named in `only`, in catalog order.
pub fn filter_projects(
    projects: Vec<ProjectDescriptor>,
    only: &[String],
) -> anyhow::Result<Vec<ProjectDescriptor>> {
    if only.is_empty() {
        return Ok(projects);
    }
    if let Some(unknown) = only
        .iter()
        .find(|id| !projects.iter().any(|p| &p.id == *id))
    {
        anyhow::bail!("project '{unknown}' is not in the catalog");
    }
    Ok(projects
        .into_iter()
        .filter(|p| only.contains(&p.id))
        .collect())
}

/// Split `owner/name`.
pub fn parse_repo(repo: &str) -> anyhow::Result<(String, String)> {
    match repo.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => anyhow::bail!("invalid repository '{repo}': expected owner/name"),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {what} file {}", path.display()))
}
