//! Exponential backoff between attempts.

use std::time::Duration;

use async_trait::async_trait;

/// Delay to wait after the failed attempt with 0-based index `attempt`.
///
/// `initial * 2^attempt`, saturating instead of overflowing. No jitter: the
/// schedule for a given policy is fully deterministic.
pub fn backoff_delay(initial: Duration, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    initial.saturating_mul(factor)
}

/// Suspends the caller between attempts.
///
/// The executor never calls `tokio::time::sleep` directly so tests can record
/// the exact schedule without waiting for it.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
