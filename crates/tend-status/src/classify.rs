//! Splits the combined open issue/PR listing.

use tend_core::sources::RawIssueOrPr;

/// One listing entry, tagged once by the presence of its `pull_request`
/// marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogItem {
    Issue(RawIssueOrPr),
    PullRequest(RawIssueOrPr),
}

impl From<RawIssueOrPr> for BacklogItem {
    fn from(item: RawIssueOrPr) -> Self {
        if item.is_pull_request() {
            Self::PullRequest(item)
        } else {
            Self::Issue(item)
        }
    }
}

/// Open pull requests and issues, each in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backlog {
    pub prs: Vec<RawIssueOrPr>,
    pub issues: Vec<RawIssueOrPr>,
}

impl Backlog {
    #[must_use]
    pub fn classify(items: Vec<RawIssueOrPr>) -> Self {
        items.into_iter().map(BacklogItem::from).collect()
    }
}

impl FromIterator<BacklogItem> for Backlog {
    fn from_iter<I: IntoIterator<Item = BacklogItem>>(iter: I) -> Self {
        let mut backlog = Self::default();
        for item in iter {
            match item {
                BacklogItem::PullRequest(pr) => backlog.prs.push(pr),
                BacklogItem::Issue(issue) => backlog.issues.push(issue),
            }
        }
        backlog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(number: u64, pr: bool) -> RawIssueOrPr {
        RawIssueOrPr {
            number,
            title: format!("#{number}"),
            url: format!("https://github.com/o/r/issues/{number}"),
            labels: Vec::new(),
            created_at: None,
            pull_request: pr.then(|| json!({})),
        }
    }

    fn numbers(items: &[RawIssueOrPr]) -> Vec<u64> {
        items.iter().map(|i| i.number).collect()
    }

    #[test]
    fn routes_by_marker_and_keeps_order() {
        let backlog = Backlog::classify(vec![
            item(1, true),
            item(2, false),
            item(3, false),
            item(4, true),
            item(5, true),
        ]);
        assert_eq!(numbers(&backlog.prs), vec![1, 4, 5]);
        assert_eq!(numbers(&backlog.issues), vec![2, 3]);
    }

    #[test]
    fn every_item_lands_exactly_once() {
        let items: Vec<_> = (0..20).map(|n| item(n, n % 3 == 0)).collect();
        let backlog = Backlog::classify(items);
        assert_eq!(backlog.prs.len() + backlog.issues.len(), 20);
        assert!(backlog.prs.iter().all(RawIssueOrPr::is_pull_request));
        assert!(!backlog.issues.iter().any(RawIssueOrPr::is_pull_request));
    }

    #[test]
    fn empty_listing_gives_empty_sequences() {
        assert_eq!(Backlog::classify(Vec::new()), Backlog::default());
    }
}
