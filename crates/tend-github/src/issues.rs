//! Open issues and pull requests.
//!
//! The issues endpoint lists both kinds together; pull requests carry a
//! `pull_request` object. The marker is passed through untouched so the
//! status engine can classify the combined list.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tend_core::de;
use tend_core::sources::{Label, RawIssueOrPr};

use crate::{GithubClient, error::GithubError, http::check_response};

const PAGE_SIZE: usize = 100;

#[derive(serde::Deserialize)]
struct IssueItem {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    labels: Vec<LabelItem>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::present")]
    pull_request: Option<Value>,
}

/// Labels arrive as objects from the REST API, but bare names are accepted
/// too.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LabelItem {
    Object { name: String },
    Name(String),
}

impl From<IssueItem> for RawIssueOrPr {
    fn from(item: IssueItem) -> Self {
        Self {
            number: item.number,
            title: item.title,
            url: item.html_url,
            labels: item
                .labels
                .into_iter()
                .map(|label| match label {
                    LabelItem::Object { name } | LabelItem::Name(name) => Label { name },
                })
                .collect(),
            created_at: item.created_at,
            pull_request: item.pull_request,
        }
    }
}

impl GithubClient {
    /// Every open issue and pull request, following pagination until a short
    /// page.
    ///
    /// # Errors
    ///
    /// Returns the first transport, status, or parse error; no partial list
    /// is returned.
    pub async fn list_open_issues(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<RawIssueOrPr>, GithubError> {
        let resource = format!("{owner}/{name}");
        let base = format!(
            "{}/issues?state=open&per_page={PAGE_SIZE}",
            self.repo_url(owner, name)
        );
        let mut items = Vec::new();

        for page in 1.. {
            let url = format!("{base}&page={page}");
            tracing::debug!(%resource, page, "fetching open issues");
            let resp = check_response(self.get(&url).send().await?, &resource).await?;
            let batch: Vec<IssueItem> = resp
                .json()
                .await
                .map_err(|e| GithubError::Parse(format!("issues for {resource}: {e}")))?;
            let last_page = batch.len() < PAGE_SIZE;
            items.extend(batch.into_iter().map(RawIssueOrPr::from));
            if last_page {
                break;
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_marker_and_label_names() {
        let items: Vec<IssueItem> = serde_json::from_str(
            r#"[
                {
                    "number": 7,
                    "title": "chore: release 10.2.0",
                    "html_url": "https://github.com/npm/cli/pull/7",
                    "labels": [{"id": 1, "name": "autorelease: pending", "color": "ededed"}],
                    "created_at": "2024-01-02T03:04:05Z",
                    "pull_request": {"url": "https://api.github.com/repos/npm/cli/pulls/7"}
                },
                {
                    "number": 8,
                    "title": "[BUG] it broke",
                    "html_url": "https://github.com/npm/cli/issues/8",
                    "labels": ["Bug"]
                }
            ]"#,
        )
        .unwrap();
        let raw: Vec<RawIssueOrPr> = items.into_iter().map(RawIssueOrPr::from).collect();

        assert!(raw[0].is_pull_request());
        assert!(raw[0].has_label("autorelease: pending"));
        assert_eq!(raw[0].url, "https://github.com/npm/cli/pull/7");
        assert!(!raw[1].is_pull_request());
        assert_eq!(raw[1].labels, vec![Label { name: "Bug".to_string() }]);
    }

    #[test]
    fn null_marker_still_means_pull_request() {
        let items: Vec<IssueItem> = serde_json::from_str(
            r#"[{"number": 1, "title": "t", "html_url": "u", "pull_request": null}]"#,
        )
        .unwrap();
        let raw = RawIssueOrPr::from(items.into_iter().next().unwrap());
        assert!(raw.is_pull_request());
    }
}
