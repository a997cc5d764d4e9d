//! # tend-github
//!
//! GitHub REST client for Tend.
//!
//! Covers the repository-side lookups of a status record:
//! - latest commit, optionally scoped to a workspace path
//! - repository metadata (full and workspace projections)
//! - combined check-run outcome for a commit
//! - every open issue and pull request
//! - `package.json` read from the repository
//!
//! [`GithubClient`] implements [`tend_core::api::RepoApi`]. It performs no
//! retries; rate limiting surfaces as [`GithubError::RateLimited`].

pub mod checks;
pub mod commits;
pub mod contents;
pub mod issues;
pub mod repos;

mod error;
mod http;

pub use error::GithubError;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tend_core::api::RepoApi;
use tend_core::errors::SourceError;
use tend_core::sources::{
    CiStatus, Commit, CommitSha, FullRepository, PackageManifest, RawIssueOrPr,
};

const API_VERSION: &str = "2022-11-28";

/// HTTP client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client for `api_url` (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(api_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(concat!("tend/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(ToString::to_string),
        })
    }

    /// Whether requests carry a token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `{api_url}/repos/{owner}/{name}` with both segments escaped.
    fn repo_url(&self, owner: &str, name: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(name)
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RepoApi for GithubClient {
    async fn commit(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Commit, SourceError> {
        Ok(self.latest_commit(owner, name, path).await?)
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<FullRepository, SourceError> {
        Ok(self.get_repository(owner, name).await?)
    }

    async fn status(
        &self,
        owner: &str,
        name: &str,
        sha: &CommitSha,
    ) -> Result<Option<CiStatus>, SourceError> {
        Ok(self.combined_check_status(owner, name, sha).await?)
    }

    async fn open_issues_and_prs(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<RawIssueOrPr>, SourceError> {
        Ok(self.list_open_issues(owner, name).await?)
    }

    async fn repo_manifest(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Option<PackageManifest>, SourceError> {
        Ok(self.package_json(owner, name, path).await?)
    }
}
