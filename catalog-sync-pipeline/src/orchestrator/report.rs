//! Sync run report types.
//!
//! Silent partial failure is disallowed: every failed batch is enumerable
//! by the caller, with its position, id range, and error.

use crate::errors::BatchError;

/// How a sync run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Every batch succeeded.
    Completed,
    /// At least one batch failed, but not all; the index holds partial
    /// updates and a re-run will reconcile the rest.
    Degraded,
    /// Cancellation was requested between batches; remaining batches were
    /// not attempted.
    Cancelled,
}

/// One failed batch, with enough context to retry or investigate it.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Zero-based position of the batch in the run.
    pub batch_index: usize,
    /// Id of the first record in the batch.
    pub first_id: String,
    /// Id of the last record in the batch.
    pub last_id: String,
    /// Number of records in the batch.
    pub record_count: usize,
    /// The error that failed the batch.
    pub error: BatchError,
}

/// Aggregate result of a sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Records fetched from the catalog.
    pub total_records: usize,
    /// Batches produced by partitioning (`ceil(total_records / batch_size)`).
    pub total_batches: usize,
    /// Batches actually attempted (fewer than total on cancellation).
    pub attempted_batches: usize,
    /// Batches that completed embed and upsert.
    pub succeeded_batches: usize,
    /// Records written to the index.
    pub records_upserted: usize,
    /// Every failed batch, in run order.
    pub failures: Vec<BatchFailure>,
    /// How the run ended.
    pub outcome: SyncOutcome,
}

impl SyncReport {
    /// Create an empty report for a run over `total_records` records.
    pub(crate) fn new(total_records: usize, total_batches: usize) -> Self {
        Self {
            total_records,
            total_batches,
            attempted_batches: 0,
            succeeded_batches: 0,
            records_upserted: 0,
            failures: Vec::new(),
            outcome: SyncOutcome::Completed,
        }
    }

    /// Number of failed batches.
    pub fn failed_batches(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_completed() {
        let report = SyncReport::new(0, 0);
        assert_eq!(report.outcome, SyncOutcome::Completed);
        assert_eq!(report.failed_batches(), 0);
    }
}
