//! Retry with exponential back-off and jitter for provider requests.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

/// Provider statuses that the service documents as worth retrying.
const TRANSIENT_STATUSES: [&str; 2] = ["UNKNOWN_ERROR", "OVER_QUERY_LIMIT"];

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 5xx, and the
/// `UNKNOWN_ERROR` / `OVER_QUERY_LIMIT` provider statuses.
///
/// **Not retriable:** any other provider status (`ZERO_RESULTS`,
/// `REQUEST_DENIED`, `INVALID_REQUEST`, ...), malformed bodies, and
/// configuration errors.
pub(crate) fn is_retriable(err: &ProviderError) -> bool {
    match err {
        ProviderError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ProviderError::Status(status) => TRANSIENT_STATUSES.contains(&status.as_str()),
        ProviderError::Deserialize { .. }
        | ProviderError::InvalidUrl(_)
        | ProviderError::NotConfigured(_)
        | ProviderError::InvalidPosition(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms × 2^(n-1)` ± 25 % jitter, capped at
/// 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "map provider transient error; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
