//! Utility functions for Telegram API calls.

use crate::config::{
    TELEGRAM_API_INITIAL_BACKOFF_MS, TELEGRAM_API_MAX_BACKOFF_MS, TELEGRAM_API_MAX_RETRIES,
};
use std::time::Duration;
use teloxide::RequestError;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::warn;

/// Whether a failed request is worth repeating.
///
/// Only network and I/O hiccups qualify. API errors such as "message is not
/// modified" fail the same way every time. Flood-wait replies are not retried
/// either: the backoff is far shorter than the wait Telegram asks for.
#[must_use]
pub const fn is_transient(error: &RequestError) -> bool {
    matches!(error, RequestError::Network(_) | RequestError::Io(_))
}

/// Retry a Telegram API operation with exponential backoff.
///
/// The retry strategy uses exponential backoff with jitter:
/// - Initial delay: 500ms
/// - Max delay: 4s
/// - Max retries: 3
///
/// Non-transient errors (see [`is_transient`]) are returned immediately.
///
/// # Errors
///
/// Returns the last error if all attempts fail.
pub async fn retry_telegram_operation<F, Fut, T>(operation: F) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RequestError>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(TELEGRAM_API_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TELEGRAM_API_MAX_BACKOFF_MS))
        .map(jitter)
        .take(TELEGRAM_API_MAX_RETRIES);

    RetryIf::start(retry_strategy, operation, is_transient)
        .await
        .map_err(|e| {
            if is_transient(&e) {
                warn!(
                    "Telegram API operation failed after {} retries: {}",
                    TELEGRAM_API_MAX_RETRIES, e
                );
            }
            e
        })
}
