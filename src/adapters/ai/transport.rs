//! HTTP plumbing shared by the hosted-model providers.
//!
//! Both vendors speak JSON over HTTPS and fail in the same handful of ways,
//! so status mapping and the retry loop live here.

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::AIError;

/// First backoff step of [`with_retries`]; later steps double it.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default wait when a 429 carries no usable retry hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Maps a transport-level reqwest failure to an `AIError`.
pub(crate) fn map_send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Passes successful responses through and turns the rest into errors.
pub(crate) async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = parse_retry_after(response.headers());
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, retry_after, &body))
}

pub(crate) fn classify_status(status: StatusCode, retry_after: Option<u32>, body: &str) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        400 | 413 => {
            if body.contains("context_length_exceeded")
                || body.contains("maximum context length")
                || body.contains("exceeds the maximum number of tokens")
            {
                AIError::context_too_long(0, 0)
            } else {
                AIError::InvalidRequest(body.to_string())
            }
        }
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|secs| secs.ceil().max(0.0) as u32)
}

/// Runs `attempt` until it succeeds, fails permanently, or retries run out.
///
/// Delay doubles after each retryable failure: `base`, `2 * base`, `4 * base`...
pub(crate) async fn with_retries<T, F, Fut>(
    max_retries: u32,
    base_delay: Duration,
    mut attempt: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && retry_count < max_retries => {
                let delay = base_delay * (1u32 << retry_count.min(16));
                tracing::debug!(error = %err, retry = retry_count + 1, ?delay, "Retrying AI request");
                sleep(delay).await;
                retry_count += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Rough token count; both vendors average about four characters per token.
pub(crate) fn estimate_tokens(text: &str) -> u32 {
    (text.len() / 4).max(1) as u32
}
