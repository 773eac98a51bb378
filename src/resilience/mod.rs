//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! RequestSpec + extract fn
//!     → retries.rs (precondition check, bounded attempt loop)
//!     → transport.rs (one POST, credential attached at send time)
//!     → timeouts.rs (per-attempt deadline)
//!     → On retryable failure: backoff.rs (initial * 2^i, via Sleeper)
//!     → CallOutcome (never an error)
//! ```
//!
//! # Design Decisions
//! - Every attempt has a deadline; a hung request is bounded by it alone
//! - Transport and unexpected failures retry identically but log apart
//! - No jitter and no hidden sleeps: the only delay is the documented backoff
//! - Transport and Sleeper are traits so the schedule can be tested exactly

pub mod backoff;
pub mod retries;
pub mod timeouts;
pub mod transport;
pub mod types;

pub use backoff::{backoff_delay, Sleeper, TokioSleeper};
pub use retries::{RetryPolicy, RetryingRequestExecutor};
pub use transport::{HttpTransport, Transport};
pub use types::{
    AttemptFailure, AttemptResult, CallOutcome, Credential, ExtractionError, FailureKind,
    FailureMetadata, RequestSpec, Subject,
};
