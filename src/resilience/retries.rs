//! Retry logic.
//!
//! # Responsibilities
//! - Refuse to send when a precondition (credential) is missing
//! - Execute up to `max_retries` attempts with exponential backoff
//! - Turn every exit path into a `CallOutcome`
//!
//! # Exit conditions
//! ```text
//! precondition fails            → Failed(precondition), 0 attempts, no sleep
//! attempt i succeeds            → Extracted, i+1 attempts
//!     extraction misses field   → Extracted(fallback), not retried
//! attempt i terminal            → Failed(terminal), i+1 attempts
//! attempt i retryable, i < N-1  → sleep initial * 2^i, next attempt
//! attempt N-1 retryable         → Failed(transport|unexpected), N attempts
//! ```

use std::time::{Duration, Instant};

use chrono::Local;
use serde_json::Value;

use crate::observability::metrics;
use crate::resilience::backoff::{backoff_delay, Sleeper, TokioSleeper};
use crate::resilience::transport::Transport;
use crate::resilience::types::{
    AttemptFailure, AttemptResult, CallOutcome, ExtractionError, FailureKind, FailureMetadata,
    RequestSpec, Subject,
};

/// Bounds on how hard the executor tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    /// `max_retries` is the total attempt ceiling and is clamped to at least 1.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            initial_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Sleep after failed attempt `attempt`, or `None` after the last one.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt + 1 < self.max_retries).then(|| backoff_delay(self.initial_delay, attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

impl From<&crate::config::RetryConfig> for RetryPolicy {
    fn from(config: &crate::config::RetryConfig) -> Self {
        Self::new(config.max_retries, config.initial_delay())
    }
}

/// Executes one logical request with bounded retries.
pub struct RetryingRequestExecutor<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
    extraction_fallback: String,
}

impl<T: Transport> RetryingRequestExecutor<T, TokioSleeper> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_sleeper(transport, TokioSleeper, policy)
    }
}

impl<T: Transport, S: Sleeper> RetryingRequestExecutor<T, S> {
    pub fn with_sleeper(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
            extraction_fallback: "Failed to generate report text.".to_string(),
        }
    }

    /// Text returned when a successful response lacks the expected field.
    pub fn with_extraction_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.extraction_fallback = fallback.into();
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `request` until it succeeds, fails terminally, or the attempt
    /// ceiling is reached. Never returns an error: failures are `CallOutcome::Failed`.
    pub async fn execute<F>(&self, subject: &Subject, request: &RequestSpec, extract: F) -> CallOutcome
    where
        F: FnOnce(&Value) -> Result<String, ExtractionError>,
    {
        let start_time = Instant::now();
        let outcome = self.run(subject, request, extract).await;
        metrics::record_outcome(&outcome, start_time);
        outcome
    }

    async fn run<F>(&self, subject: &Subject, request: &RequestSpec, extract: F) -> CallOutcome
    where
        F: FnOnce(&Value) -> Result<String, ExtractionError>,
    {
        if let Err(reason) = request.check_preconditions() {
            tracing::error!(
                name = %subject.name,
                domain = %subject.domain,
                error = %reason,
                "Precondition failed, skipping request"
            );
            return failed(subject, reason, 0, FailureKind::Precondition);
        }

        let max_retries = self.policy.max_retries;
        let mut last_failure: Option<AttemptFailure> = None;

        for attempt in 0..max_retries {
            metrics::record_attempt();
            tracing::debug!(
                domain = %subject.domain,
                attempt = attempt + 1,
                max_retries,
                "Sending request"
            );

            let failure = match AttemptResult::from(self.transport.send(request).await) {
                AttemptResult::Success(payload) => {
                    return self.extracted(subject, &payload, extract, attempt + 1);
                }
                AttemptResult::TerminalFailure(failure) => {
                    tracing::error!(
                        domain = %subject.domain,
                        attempt = attempt + 1,
                        error = %failure,
                        "Request cannot be sent, giving up"
                    );
                    return failed(subject, failure.to_string(), attempt + 1, failure.kind());
                }
                AttemptResult::RetryableFailure(failure) => failure,
            };

            match self.policy.delay_after(attempt) {
                Some(delay) => {
                    match failure.kind() {
                        FailureKind::Unexpected => tracing::warn!(
                            domain = %subject.domain,
                            attempt = attempt + 1,
                            max_retries,
                            delay = ?delay,
                            error = %failure,
                            "Unexpected error, retrying"
                        ),
                        _ => tracing::warn!(
                            domain = %subject.domain,
                            attempt = attempt + 1,
                            max_retries,
                            delay = ?delay,
                            error = %failure,
                            "Request failed, retrying"
                        ),
                    }
                    metrics::record_retry(failure.kind());
                    self.sleeper.sleep(delay).await;
                }
                None => {
                    tracing::error!(
                        domain = %subject.domain,
                        attempts = attempt + 1,
                        error = %failure,
                        "Failed to generate data after all attempts"
                    );
                }
            }

            last_failure = Some(failure);
        }

        match last_failure {
            Some(failure) => failed(subject, failure.to_string(), max_retries, failure.kind()),
            None => failed(subject, "no attempts were made".to_string(), 0, FailureKind::Terminal),
        }
    }

    fn extracted<F>(&self, subject: &Subject, payload: &Value, extract: F, attempts: u32) -> CallOutcome
    where
        F: FnOnce(&Value) -> Result<String, ExtractionError>,
    {
        match extract(payload) {
            Ok(text) => {
                tracing::info!(domain = %subject.domain, attempts, "Response received");
                CallOutcome::Extracted {
                    text,
                    attempts,
                    fallback: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    domain = %subject.domain,
                    attempts,
                    error = %e,
                    "Response lacks expected text, using fallback"
                );
                CallOutcome::Extracted {
                    text: self.extraction_fallback.clone(),
                    attempts,
                    fallback: true,
                }
            }
        }
    }
}

fn failed(subject: &Subject, reason: String, attempts: u32, kind: FailureKind) -> CallOutcome {
    CallOutcome::Failed {
        reason,
        metadata: FailureMetadata {
            subject: subject.clone(),
            at: Local::now(),
            attempts,
            kind,
        },
    }
}
