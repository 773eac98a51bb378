//! Metrics collection and exposition.
//!
//! # Metrics
//! - `scout_attempts_total` (counter): network attempts made
//! - `scout_retries_total` (counter): backoff sleeps, by failure kind
//! - `scout_outcomes_total` (counter): call outcomes, by outcome
//! - `scout_call_duration_seconds` (histogram): wall time per call incl. backoff
//! - `scout_reports_written_total` (counter): report files, by created/replaced
//!
//! Recording is a no-op unless a recorder is installed. The CLI installs the
//! Prometheus recorder only when a snapshot path is configured and renders it
//! to a file once the run ends.

use std::path::Path;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::resilience::{CallOutcome, FailureKind};

/// Install the Prometheus recorder as the global metrics recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Render the current metrics in Prometheus text format to `path`.
pub fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, handle.render())
}

pub fn record_attempt() {
    counter!("scout_attempts_total").increment(1);
}

pub fn record_retry(kind: FailureKind) {
    counter!("scout_retries_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_outcome(outcome: &CallOutcome, start_time: Instant) {
    let label = match outcome {
        CallOutcome::Extracted { fallback: false, .. } => "extracted",
        CallOutcome::Extracted { fallback: true, .. } => "fallback",
        CallOutcome::Failed { metadata, .. } => metadata.kind.as_str(),
    };
    counter!("scout_outcomes_total", "outcome" => label).increment(1);
    histogram!("scout_call_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

pub fn record_report_written(replaced: bool) {
    let mode = if replaced { "replaced" } else { "created" };
    counter!("scout_reports_written_total", "mode" => mode).increment(1);
}
