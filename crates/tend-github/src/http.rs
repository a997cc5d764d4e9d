//! Response checks shared by every GitHub call.
//!
//! GitHub signals rate limiting two ways: 429, or 403 with
//! `x-ratelimit-remaining: 0`. Both become [`GithubError::RateLimited`];
//! nothing here retries.

use chrono::Utc;

use crate::error::GithubError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Map non-success responses for `resource` into [`GithubError`].
pub async fn check_response(
    resp: reqwest::Response,
    resource: &str,
) -> Result<reqwest::Response, GithubError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(GithubError::NotFound {
            resource: resource.to_string(),
        });
    }
    if is_rate_limited(&resp) {
        return Err(GithubError::RateLimited {
            retry_after_secs: retry_after(&resp, Utc::now().timestamp()),
        });
    }
    Err(GithubError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}

fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

fn is_rate_limited(resp: &reqwest::Response) -> bool {
    match resp.status() {
        reqwest::StatusCode::TOO_MANY_REQUESTS => true,
        reqwest::StatusCode::FORBIDDEN => header(resp, "x-ratelimit-remaining") == Some("0"),
        _ => false,
    }
}

/// Seconds until the limit lifts: `Retry-After` first, then the
/// `x-ratelimit-reset` epoch relative to `now`, then 60 s.
fn retry_after(resp: &reqwest::Response, now: i64) -> u64 {
    if let Some(secs) = header(resp, "retry-after").and_then(|v| v.trim().parse::<u64>().ok()) {
        return secs;
    }
    header(resp, "x-ratelimit-reset")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|reset| u64::try_from(reset.saturating_sub(now)).ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
