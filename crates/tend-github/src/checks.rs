//! Combined check-run outcome for a commit.

use tend_core::sources::{CiStatus, CommitSha};

use crate::{GithubClient, error::GithubError, http::check_response};

/// Conclusions that make the combined outcome a failure.
const FAILING: &[&str] = &[
    "failure",
    "timed_out",
    "cancelled",
    "action_required",
    "startup_failure",
];

#[derive(serde::Deserialize)]
struct CheckRunsResponse {
    #[serde(default)]
    check_runs: Vec<CheckRun>,
}

#[derive(serde::Deserialize)]
struct CheckRun {
    status: String,
    #[serde(default)]
    conclusion: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

/// Fold individual runs into one outcome.
///
/// No runs yields no status. A failing run wins and links to itself; any
/// unfinished run makes the outcome `pending`; otherwise `success`.
fn combine(runs: &[CheckRun]) -> Option<CiStatus> {
    if runs.is_empty() {
        return None;
    }
    if let Some(failed) = runs
        .iter()
        .find(|run| run.conclusion.as_deref().is_some_and(|c| FAILING.contains(&c)))
    {
        return Some(CiStatus {
            url: failed.html_url.clone(),
            conclusion: Some("failure".to_string()),
        });
    }
    let conclusion = if runs.iter().any(|run| run.status != "completed") {
        "pending"
    } else {
        "success"
    };
    Some(CiStatus {
        url: None,
        conclusion: Some(conclusion.to_string()),
    })
}

impl GithubClient {
    /// Combined check-run outcome for `sha`; `None` when no checks ran.
    ///
    /// # Errors
    ///
    /// Returns any transport, status, or parse error.
    pub async fn combined_check_status(
        &self,
        owner: &str,
        name: &str,
        sha: &CommitSha,
    ) -> Result<Option<CiStatus>, GithubError> {
        let resource = format!("{owner}/{name}@{sha}");
        let url = format!(
            "{}/commits/{}/check-runs?per_page=100",
            self.repo_url(owner, name),
            urlencoding::encode(sha.as_str())
        );
        tracing::debug!(%resource, "fetching check runs");
        let resp = check_response(self.get(&url).send().await?, &resource).await?;
        let data: CheckRunsResponse = resp
            .json()
            .await
            .map_err(|e| GithubError::Parse(format!("check runs for {resource}: {e}")))?;
        Ok(combine(&data.check_runs))
    }
}
