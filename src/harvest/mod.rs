//! Harvest run orchestration.
//!
//! # Data Flow
//! ```text
//! Vec<UniversityRecord>
//!     → runner.rs (one at a time)
//!         → gemini::ReportClient::fetch → CallOutcome
//!         → report::render → ReportWriter::write
//!         → politeness delay
//!     → summary.rs (HarvestSummary)
//! ```

pub mod runner;
pub mod summary;

pub use runner::HarvestRunner;
pub use summary::HarvestSummary;
