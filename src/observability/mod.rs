//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! executor, client, report writer, runner:
//!     → logging.rs (structured log events, one span per university)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (human-readable or JSON lines)
//!     → Prometheus text snapshot written at the end of the run (optional)
//! ```

pub mod logging;
pub mod metrics;
