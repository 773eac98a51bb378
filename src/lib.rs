//! Transfer admissions requirements harvester.
//!
//! Walks a list of universities, asks a grounded generative search API for
//! each one's transfer requirements, and writes one text report per
//! university. Network calls go through a bounded, exponentially backed-off
//! retry executor that always hands back a value, so one bad university never
//! stops the run.

pub mod catalog;
pub mod config;
pub mod gemini;
pub mod harvest;
pub mod observability;
pub mod report;
pub mod resilience;

pub use config::ScoutConfig;
pub use harvest::{HarvestRunner, HarvestSummary};
pub use resilience::{CallOutcome, RetryingRequestExecutor};
