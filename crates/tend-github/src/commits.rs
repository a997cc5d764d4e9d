//! Latest commit lookup.

use chrono::{DateTime, Utc};
use tend_core::sources::Commit;

use crate::{GithubClient, error::GithubError, http::check_response};

#[derive(serde::Deserialize)]
struct CommitItem {
    sha: String,
    html_url: String,
    commit: CommitDetail,
}

#[derive(serde::Deserialize)]
struct CommitDetail {
    author: Option<Signature>,
    committer: Option<Signature>,
}

#[derive(serde::Deserialize)]
struct Signature {
    date: DateTime<Utc>,
}

impl CommitItem {
    fn into_commit(self) -> Result<Commit, GithubError> {
        let date = self
            .commit
            .author
            .or(self.commit.committer)
            .map(|signature| signature.date)
            .ok_or_else(|| GithubError::Parse(format!("commit {} has no date", self.sha)))?;
        Ok(Commit {
            sha: self.sha,
            date,
            html_url: self.html_url,
        })
    }
}

impl GithubClient {
    /// Most recent commit on the default branch, limited to `path` when given.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::NoCommits`] when the listing is empty, otherwise
    /// any transport, status, or parse error.
    pub async fn latest_commit(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Commit, GithubError> {
        let mut url = format!("{}/commits?per_page=1", self.repo_url(owner, name));
        if let Some(path) = path {
            url.push_str("&path=");
            url.push_str(&urlencoding::encode(path));
        }
        let resource = match path {
            Some(path) => format!("{owner}/{name}:{path}"),
            None => format!("{owner}/{name}"),
        };
        tracing::debug!(%resource, "fetching latest commit");

        let resp = check_response(self.get(&url).send().await?, &resource).await?;
        let items: Vec<CommitItem> = resp
            .json()
            .await
            .map_err(|e| GithubError::Parse(format!("commits for {resource}: {e}")))?;
        items
            .into_iter()
            .next()
            .ok_or(GithubError::NoCommits { resource })?
            .into_commit()
    }
}
