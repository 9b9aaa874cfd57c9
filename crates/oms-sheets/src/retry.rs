//! Retry with exponential back-off and jitter for row-store requests.
//!
//! The script endpoint sits behind a shared quota, so bursts of 429s and
//! short-lived 5xx responses are common. Application-level failures (script
//! errors, malformed bodies, 404s) are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// Retriable:
/// - [`SheetError::Http`]: timeouts, connection resets, TLS failures.
/// - [`SheetError::RateLimited`]: HTTP 429.
/// - [`SheetError::UnexpectedStatus`] with a 5xx status.
pub(crate) fn is_retriable(err: &SheetError) -> bool {
    match err {
        SheetError::Http(_) | SheetError::RateLimited { .. } => true,
        SheetError::UnexpectedStatus { status, .. } => *status >= 500,
        SheetError::Deserialize { .. }
        | SheetError::Serialize { .. }
        | SheetError::MissingEndpoint { .. }
        | SheetError::NotFound { .. }
        | SheetError::Script { .. }
        | SheetError::StaleDeployment
        | SheetError::Rejected { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry waits `backoff_base_secs * 2^(n-1)` seconds ±25 % jitter,
/// capped at 60 s, and never sooner than a 429's `Retry-After`. With
/// `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SheetError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms =
                    backoff_delay_ms(&err, attempt, backoff_base_secs, rand::random::<f64>());
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient row-store error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based).
///
/// `jitter` in `[0, 1)` scales the exponential delay by 0.75..1.25. A 429's
/// `Retry-After` is a floor. The result never exceeds 60 s.
fn backoff_delay_ms(err: &SheetError, attempt: u32, backoff_base_secs: u64, jitter: f64) -> u64 {
    let computed = backoff_base_secs
        .saturating_mul(1_000)
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (jitter * 0.5 + 0.75)) as u64;

    let floor = if let SheetError::RateLimited {
        retry_after_secs, ..
    } = err
    {
        retry_after_secs.saturating_mul(1_000)
    } else {
        0
    };
    jittered.max(floor).min(MAX_DELAY_MS)
}
