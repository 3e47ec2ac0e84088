//! Error types for the catalog sync pipeline.

use thiserror::Error;

use crate::orchestrator::SyncReport;
use catalog_sync_repository::{EmbeddingError, IndexError, SourceError};

/// An error that failed one batch.
///
/// Transient batch errors are recorded in the run report and do not stop
/// the run; fatal ones abort it, since every remaining batch would fail the
/// same way.
#[derive(Debug, Clone, Error)]
pub enum BatchError {
    /// The embedding call for the batch failed.
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The upsert call for the batch failed.
    #[error("Index write error: {0}")]
    IndexWrite(#[from] IndexError),

    /// An embedding's length does not match the index's declared dimension.
    /// Letting such a vector through would corrupt the index, so this is
    /// always fatal.
    #[error("Dimension mismatch: embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl BatchError {
    /// Whether this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        match self {
            BatchError::Embedding(e) => e.is_fatal(),
            BatchError::IndexWrite(e) => e.is_fatal(),
            BatchError::DimensionMismatch { .. } => true,
        }
    }
}

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The index could not be provisioned; no data was moved.
    #[error("Provisioning error: {0}")]
    Provisioning(#[source] IndexError),

    /// The catalog could not be read; no data was moved.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// A batch hit a fatal error (authentication class or dimension
    /// mismatch); remaining batches were not attempted.
    #[error("Fatal error in batch {batch_index}: {error}")]
    FatalBatch { batch_index: usize, error: BatchError },

    /// Every attempted batch failed.
    #[error("Every attempted batch failed")]
    AllBatchesFailed { report: SyncReport },
}
