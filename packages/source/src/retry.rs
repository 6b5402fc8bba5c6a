//! HTTP retry helper for transient errors.
//!
//! The client calls [`send_json`] instead of
//! `reqwest::RequestBuilder::send()` directly, so every request gets
//! automatic retry with exponential backoff on timeouts, connection
//! resets, HTTP 429, and HTTP 5xx.

use std::time::Duration;

use crate::SourceError;

/// Maximum number of retry attempts for transient HTTP errors.
///
/// With exponential backoff (2s, 4s, 8s, 16s, 32s) the total wait
/// before giving up is 62 seconds.
const MAX_RETRIES: u32 = 5;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// Does **not** retry HTTP 4xx (except 429) — these are permanent.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server answers with a non-retryable status code, or the body cannot
/// be parsed as JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let response = match build_request().send().await {
            Ok(response) => response,
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    continue;
                }
                return Err(SourceError::Http(e));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            if attempt < MAX_RETRIES {
                log::warn!("  HTTP {status}");
                continue;
            }
            return Err(SourceError::UnexpectedResponse {
                message: format!("HTTP {status} after {MAX_RETRIES} retries"),
            });
        }
        if status.is_client_error() {
            return Err(SourceError::UnexpectedResponse {
                message: format!("HTTP {status}"),
            });
        }

        return Ok(response.json().await?);
    }

    Err(SourceError::UnexpectedResponse {
        message: "request failed after all retries".to_string(),
    })
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
