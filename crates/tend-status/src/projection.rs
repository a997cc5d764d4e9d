//! Turns a classified backlog into the display summaries on the record.

use std::collections::BTreeMap;

use tend_core::record::BacklogSummary;
use tend_core::sources::RawIssueOrPr;

/// Which half of the backlog is being projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklogKind {
    Issues,
    PullRequests,
}

impl BacklogKind {
    /// Path segment of the host's list page.
    #[must_use]
    pub const fn list_segment(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::PullRequests => "pulls",
        }
    }
}

/// Builds the display summary for one backlog kind.
///
/// `items` is `None` when the backlog was never fetched (workspace
/// projects). `history` holds the same kind's summary from each prior
/// snapshot, oldest first.
pub trait BacklogProjection: Send + Sync {
    fn project(
        &self,
        kind: BacklogKind,
        items: Option<&[RawIssueOrPr]>,
        repo_html_url: &str,
        history: &[Option<&BacklogSummary>],
    ) -> Option<BacklogSummary>;
}

/// Count, list link, per-label counts and prior counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryProjection;

impl BacklogProjection for SummaryProjection {
    fn project(
        &self,
        kind: BacklogKind,
        items: Option<&[RawIssueOrPr]>,
        repo_html_url: &str,
        history: &[Option<&BacklogSummary>],
    ) -> Option<BacklogSummary> {
        let items = items?;

        let mut labels = BTreeMap::new();
        for label in items.iter().flat_map(|item| &item.labels) {
            *labels.entry(label.name.clone()).or_insert(0) += 1;
        }

        Some(BacklogSummary {
            count: items.len(),
            url: format!(
                "{}/{}",
                repo_html_url.trim_end_matches('/'),
                kind.list_segment()
            ),
            labels,
            history: history.iter().flatten().map(|prior| prior.count).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tend_core::sources::Label;

    fn item(number: u64, labels: &[&str]) -> RawIssueOrPr {
        RawIssueOrPr {
            number,
            title: format!("#{number}"),
            url: format!("https://github.com/o/r/issues/{number}"),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: (*name).to_string(),
                })
                .collect(),
            created_at: None,
            pull_request: None,
        }
    }

    fn summary(count: usize) -> BacklogSummary {
        BacklogSummary {
            count,
            url: String::new(),
            labels: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn counts_items_and_labels() {
        let items = vec![item(1, &["bug"]), item(2, &["bug", "docs"]), item(3, &[])];
        let out = SummaryProjection
            .project(BacklogKind::Issues, Some(&items), "https://github.com/o/r", &[])
            .unwrap();
        assert_eq!(out.count, 3);
        assert_eq!(out.url, "https://github.com/o/r/issues");
        assert_eq!(
            out.labels,
            BTreeMap::from([("bug".to_string(), 2), ("docs".to_string(), 1)])
        );
        assert!(out.history.is_empty());
    }

    #[test]
    fn pull_requests_link_to_pulls() {
        let out = SummaryProjection
            .project(BacklogKind::PullRequests, Some(&[]), "https://github.com/o/r/", &[])
            .unwrap();
        assert_eq!(out.count, 0);
        assert_eq!(out.url, "https://github.com/o/r/pulls");
    }

    #[test]
    fn history_skips_missing_snapshots() {
        let (old, newer) = (summary(7), summary(4));
        let out = SummaryProjection
            .project(
                BacklogKind::Issues,
                Some(&[]),
                "https://github.com/o/r",
                &[Some(&old), None, Some(&newer)],
            )
            .unwrap();
        assert_eq!(out.history, vec![7, 4]);
    }

    #[test]
    fn unfetched_backlog_projects_to_none() {
        let old = summary(3);
        assert_eq!(
            SummaryProjection.project(
                BacklogKind::Issues,
                None,
                "https://github.com/o/r",
                &[Some(&old)]
            ),
            None
        );
    }
}
