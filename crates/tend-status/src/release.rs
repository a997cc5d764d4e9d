//! Pending release detection.
//!
//! Release automation opens a pull request labeled `autorelease: pending`
//! whose title carries the upcoming version, e.g. `chore: release 2.3.4`.

use std::sync::LazyLock;

use regex::Regex;
use tend_core::record::PendingRelease;
use tend_core::sources::RawIssueOrPr;

pub const PENDING_LABEL: &str = "autorelease: pending";

/// A full semantic version anywhere in the text: optional `v`,
/// `major.minor.patch`, optional pre-release and build metadata.
static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    let numeric = r"0|[1-9]\d*";
    let prerelease_id = format!(r"\d*[a-zA-Z-][a-zA-Z0-9-]*|{numeric}");
    let pattern = format!(
        r"v?(?:{numeric})\.(?:{numeric})\.(?:{numeric})(?:-(?:{prerelease_id})(?:\.(?:{prerelease_id}))*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?"
    );
    Regex::new(&pattern).expect("semver pattern is valid")
});

/// First semver token in `title`, or the title itself when there is none.
#[must_use]
pub fn release_version(title: &str) -> &str {
    SEMVER.find(title).map_or(title, |m| m.as_str())
}

/// The first pull request carrying [`PENDING_LABEL`], if any.
#[must_use]
pub fn pending_release(prs: Option<&[RawIssueOrPr]>) -> Option<PendingRelease> {
    let pr = prs?.iter().find(|pr| pr.has_label(PENDING_LABEL))?;
    Some(PendingRelease {
        url: pr.url.clone(),
        version: release_version(&pr.title).to_string(),
    })
}
