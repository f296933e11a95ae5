//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks so the endpoint modules stay focused on
//! request construction and response mapping:
//! - **401/403** → [`ClientError::Auth`]
//! - **400/422** → [`ClientError::Validation`]
//! - **409** → [`ClientError::Conflict`]
//! - **429** → [`ClientError::RateLimited`] (`Retry-After`, default 60 s)
//! - other non-success → [`ClientError::Api`]

use crate::error::ClientError;
use crate::transport::ApiResponse;

/// Fallback wait when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check a response for common error conditions.
///
/// Returns the response unchanged on success.
pub fn check_response(resp: ApiResponse) -> Result<ApiResponse, ClientError> {
    if resp.is_success() {
        return Ok(resp);
    }
    let message = summarize(&resp.body);
    match resp.status {
        401 | 403 => Err(ClientError::Auth(message)),
        400 | 422 => Err(ClientError::Validation(message)),
        409 => Err(ClientError::Conflict(message)),
        429 => Err(ClientError::RateLimited {
            retry_after_secs: resp.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        }),
        status => Err(ClientError::Api { status, message }),
    }
}

/// Parse the `Retry-After` header as seconds.
pub fn parse_retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Error bodies can be whole HTML pages; keep messages readable.
fn summarize(body: &str) -> String {
    const LIMIT: usize = 300;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return String::from("(empty response body)");
    }
    if trimmed.chars().count() <= LIMIT {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(LIMIT).collect();
    out.push('…');
    out
}
