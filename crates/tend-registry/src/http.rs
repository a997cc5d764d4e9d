//! Shared HTTP response helpers for the registry client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, 404, other non-success → [`RegistryError::Api`]) so the npm
//! module stays focused on request construction and response mapping.

use crate::error::RegistryError;

/// Seconds assumed when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **404 Not Found** → [`RegistryError::PackageNotFound`] for `package`.
/// - **429 Too Many Requests** → [`RegistryError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Other non-success status** → [`RegistryError::Api`] with status code
///   and response body.
pub async fn check_response(
    resp: reqwest::Response,
    package: &str,
) -> Result<reqwest::Response, RegistryError> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(RegistryError::PackageNotFound(package.to_string()));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RegistryError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        return Err(RegistryError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
