//! Retry with exponential backoff for page fetches.
//!
//! Only 429s and network failures are retried. A 404, an unexpected status
//! or an unusable body would come back the same on a second try.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on how long a server's `Retry-After` may hold a fetch.
pub(crate) const MAX_RETRY_AFTER_SECS: u64 = 30;

/// How long to wait before retry number `attempt + 1`, or `None` when `err`
/// is not worth retrying.
///
/// Network failures wait `backoff_base_secs * 2^attempt`. A 429 waits at
/// least that long, and longer when the server asked for more via
/// `Retry-After` (capped at [`MAX_RETRY_AFTER_SECS`]).
pub(crate) fn next_delay(
    err: &ScraperError,
    attempt: u32,
    backoff_base_secs: u64,
) -> Option<Duration> {
    // Saturates instead of overflowing on extreme configs.
    let backoff_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));

    let secs = match err {
        ScraperError::Http(_) => backoff_secs,
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => backoff_secs.max((*retry_after_secs).min(MAX_RETRY_AFTER_SECS)),
        _ => return None,
    };
    Some(Duration::from_secs(secs))
}

/// Runs `operation`, retrying transient failures up to `max_retries` times
/// after the first try. The last error is returned once retries run out;
/// non-retriable errors return at once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let delay = match next_delay(&err, attempt, backoff_base_secs) {
            Some(delay) if attempt < max_retries => delay,
            _ => return Err(err),
        };

        tracing::warn!(
            attempt,
            max_retries,
            delay_secs = delay.as_secs(),
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
