//! Sequential harvest loop.
//!
//! # Responsibilities
//! - Visit universities one at a time, in catalog order
//! - Call the report client and persist whatever comes back
//! - Keep going when a call or a write fails
//! - Pause for the politeness delay between universities (not after the last)

use std::time::Duration;

use chrono::Local;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog::UniversityRecord;
use crate::gemini::ReportClient;
use crate::harvest::summary::HarvestSummary;
use crate::report::{render, ReportWriter};
use crate::resilience::{CallOutcome, Sleeper, TokioSleeper, Transport};

pub struct HarvestRunner<T, S, P = TokioSleeper> {
    run_id: Uuid,
    client: ReportClient<T, S>,
    writer: ReportWriter,
    politeness_delay: Duration,
    pacer: P,
}

impl<T: Transport, S: Sleeper> HarvestRunner<T, S, TokioSleeper> {
    pub fn new(client: ReportClient<T, S>, writer: ReportWriter, politeness_delay: Duration) -> Self {
        Self::with_pacer(client, writer, politeness_delay, TokioSleeper)
    }
}

impl<T: Transport, S: Sleeper, P: Sleeper> HarvestRunner<T, S, P> {
    pub fn with_pacer(
        client: ReportClient<T, S>,
        writer: ReportWriter,
        politeness_delay: Duration,
        pacer: P,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            client,
            writer,
            politeness_delay,
            pacer,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn client(&self) -> &ReportClient<T, S> {
        &self.client
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Process every record and return the tally. Never aborts early.
    pub async fn run(&self, records: &[UniversityRecord]) -> HarvestSummary {
        let total = records.len();
        let mut summary = HarvestSummary::default();

        tracing::info!(
            run_id = %self.run_id,
            total,
            output_dir = %self.writer.output_dir().display(),
            "Starting database generation"
        );

        for (index, record) in records.iter().enumerate() {
            let span = tracing::info_span!(
                "university",
                run_id = %self.run_id,
                name = %record.name,
                domain = %record.domain
            );
            self.process(index, total, record, &mut summary)
                .instrument(span)
                .await;
            summary.processed += 1;

            if index + 1 < total {
                tracing::info!(delay_secs = self.politeness_delay.as_secs(), "Pausing before next university");
                self.pacer.sleep(self.politeness_delay).await;
            }
        }

        tracing::info!(
            run_id = %self.run_id,
            processed = summary.processed,
            extracted = summary.extracted,
            fallback = summary.fallback,
            failed = summary.failed,
            write_errors = summary.write_errors,
            "Database generation complete"
        );
        summary
    }

    async fn process(
        &self,
        index: usize,
        total: usize,
        record: &UniversityRecord,
        summary: &mut HarvestSummary,
    ) {
        tracing::info!(
            "[{}/{}] Processing {} ({})",
            index + 1,
            total,
            record.name,
            record.domain
        );

        let subject = record.subject();
        let generated_at = Local::now();
        let outcome = self.client.fetch(&subject).await;
        summary.record_outcome(&outcome);

        if let CallOutcome::Failed { reason, metadata } = &outcome {
            tracing::error!(
                attempts = metadata.attempts,
                kind = metadata.kind.as_str(),
                error = %reason,
                "No report generated, writing failure stub"
            );
        }

        let contents = render(&subject, &generated_at, &outcome);
        match self.writer.write(&subject, &contents) {
            Ok(written) => {
                if written.replaced {
                    summary.replaced += 1;
                    tracing::info!(path = %written.path.display(), "Report updated");
                } else {
                    summary.created += 1;
                    tracing::info!(path = %written.path.display(), "Report saved");
                }
            }
            Err(e) => {
                summary.write_errors += 1;
                tracing::error!(error = %e, "Failed to save report");
            }
        }
    }
}
