//! Retry with exponential backoff for transient content-repository failures.
//!
//! Retries are off unless the client is configured with `max_retries > 0`.
//! Non-retriable errors (parse failures, 404s, GraphQL errors) are propagated
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ContentError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ContentError::RateLimited`]: HTTP 429.
/// - [`ContentError::Http`]: network-level failure (connection reset, timeout, etc.).
/// - [`ContentError::UnexpectedStatus`] with a 5xx status.
fn is_retriable(err: &ContentError) -> bool {
    match err {
        ContentError::RateLimited { .. } | ContentError::Http(_) => true,
        ContentError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Seconds to wait before retry number `attempt + 1`.
///
/// Exponential in `attempt`, but never shorter than the `Retry-After` value a
/// rate-limited response carried.
fn backoff_delay_secs(err: &ContentError, attempt: u32, backoff_base_secs: u64) -> u64 {
    // Cap the shift so extreme configs saturate instead of overflowing.
    let exponential = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    match err {
        ContentError::RateLimited {
            retry_after_secs, ..
        } => exponential.max(*retry_after_secs),
        _ => exponential,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for `backoff_base_secs * 2^attempt`
/// seconds (or the server's `Retry-After`, whichever is longer) and tries again, up to `max_retries` additional attempts after the
/// first try. If all retries are exhausted the last error is returned.
///
/// With `max_retries = 0` the operation runs exactly once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ContentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ContentError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_delay_secs(&err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient content error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
