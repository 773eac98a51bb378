//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap each attempt with a fixed deadline
//! - Report a timed-out attempt as its own failure kind
//!
//! Timeouts are distinct from other transport errors so the logs say which
//! attempts hung and which were refused.

use std::future::Future;
use std::time::Duration;

use crate::resilience::AttemptFailure;

/// Run `fut`, converting an elapsed deadline into `AttemptFailure::Timeout`.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, AttemptFailure>
where
    F: Future<Output = Result<T, AttemptFailure>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AttemptFailure::Timeout(deadline)),
    }
}
