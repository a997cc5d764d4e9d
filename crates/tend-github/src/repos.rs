//! Repository metadata lookup.

use serde_json::Value;
use tend_core::sources::FullRepository;

use crate::{GithubClient, error::GithubError, http::check_response};

#[derive(serde::Deserialize)]
struct RepoResponse {
    default_branch: String,
    html_url: String,
    #[serde(default)]
    archived: bool,
    /// Kept loose so a non-numeric value drops the star count instead of
    /// failing the lookup.
    #[serde(default)]
    stargazers_count: Value,
    #[serde(default)]
    license: Option<RepoLicense>,
}

#[derive(serde::Deserialize)]
struct RepoLicense {
    spdx_id: Option<String>,
}

impl From<RepoResponse> for FullRepository {
    fn from(repo: RepoResponse) -> Self {
        Self {
            default_branch: repo.default_branch,
            html_url: repo.html_url,
            archived: repo.archived,
            stargazers_count: repo.stargazers_count.as_u64(),
            license_spdx_id: repo.license.and_then(|l| l.spdx_id),
        }
    }
}

impl GithubClient {
    /// Full repository metadata.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::NotFound`] for unknown repositories, otherwise
    /// any transport, status, or parse error.
    pub async fn get_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<FullRepository, GithubError> {
        let resource = format!("{owner}/{name}");
        tracing::debug!(%resource, "fetching repository");
        let resp = check_response(self.get(&self.repo_url(owner, name)).send().await?, &resource)
            .await?;
        let repo: RepoResponse = resp
            .json()
            .await
            .map_err(|e| GithubError::Parse(format!("repository {resource}: {e}")))?;
        Ok(repo.into())
    }
}
