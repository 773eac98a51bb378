//! Tally of a harvest run.

use crate::resilience::CallOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Universities visited, whatever the outcome.
    pub processed: usize,
    /// Calls that returned report text.
    pub extracted: usize,
    /// Successful calls whose response lacked text; the fallback was written.
    pub fallback: usize,
    /// Calls that ended in a failure stub.
    pub failed: usize,
    /// Reports created for the first time.
    pub created: usize,
    /// Reports that replaced an existing file.
    pub replaced: usize,
    /// Reports that could not be written.
    pub write_errors: usize,
}

impl HarvestSummary {
    pub fn record_outcome(&mut self, outcome: &CallOutcome) {
        match outcome {
            CallOutcome::Extracted { fallback: false, .. } => self.extracted += 1,
            CallOutcome::Extracted { fallback: true, .. } => self.fallback += 1,
            CallOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Files on disk after the run.
    pub fn written(&self) -> usize {
        self.created + self.replaced
    }
}
