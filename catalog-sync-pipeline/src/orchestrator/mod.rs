//! Orchestrator module for the catalog sync pipeline.
//!
//! Coordinates the provisioner, record source, projector, embedding client,
//! and vector index for one sync run.

mod report;

pub use report::{BatchFailure, SyncOutcome, SyncReport};

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{BatchError, SyncError};
use crate::projector;
use crate::provisioner::IndexProvisioner;
use catalog_sync_repository::{
    EmbeddingClient, EmbeddingError, RecordSource, UpsertVector, VectorIndexProvider,
};
use catalog_sync_shared::Record;

/// Configuration for the sync orchestrator.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Number of records per batch.
    pub batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Orchestrator that drives a full catalog sync run.
///
/// The orchestrator:
/// - Ensures the index is provisioned before any data movement
/// - Pulls all records and partitions them into fixed-size batches
/// - Drives projector → embedder → index per batch, strictly sequentially
/// - Isolates transient failures to the batch that hit them
/// - Aborts immediately on fatal (authentication-class) errors
pub struct SyncOrchestrator {
    source: Arc<dyn RecordSource>,
    embedder: Arc<dyn EmbeddingClient>,
    index: Arc<dyn VectorIndexProvider>,
    provisioner: IndexProvisioner,
    config: SyncConfig,
    shutdown_tx: watch::Sender<bool>,
}

impl SyncOrchestrator {
    /// Create a new orchestrator with the given collaborators.
    pub fn new(
        source: Arc<dyn RecordSource>,
        embedder: Arc<dyn EmbeddingClient>,
        index: Arc<dyn VectorIndexProvider>,
        provisioner: IndexProvisioner,
    ) -> Self {
        Self::with_config(source, embedder, index, provisioner, SyncConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        source: Arc<dyn RecordSource>,
        embedder: Arc<dyn EmbeddingClient>,
        index: Arc<dyn VectorIndexProvider>,
        provisioner: IndexProvisioner,
        config: SyncConfig,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            source,
            embedder,
            index,
            provisioner,
            config,
            shutdown_tx,
        }
    }

    /// Request cooperative cancellation.
    ///
    /// The run stops before starting its next batch; the batch in flight is
    /// allowed to finish since batches are small and bounded.
    pub fn shutdown(&self) {
        // send_replace stores the value even when no receiver exists yet, so
        // a shutdown requested before run() subscribes is still honored.
        self.shutdown_tx.send_replace(true);
    }

    /// Run one full sync.
    ///
    /// Provisioning and fetching errors abort before any data movement.
    /// Afterwards, batches are processed sequentially; a run where some
    /// batches failed is a degraded success (`Ok` with failures enumerated
    /// in the report), while a run where every attempted batch failed is an
    /// error.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        info!("Starting catalog sync");

        self.provisioner
            .ensure_ready()
            .await
            .map_err(SyncError::Provisioning)?;

        let records = self.source.fetch_all_records().await?;

        let batch_size = self.config.batch_size.max(1);
        let total_batches = records.len().div_ceil(batch_size);
        let mut report = SyncReport::new(records.len(), total_batches);

        if records.is_empty() {
            info!("Catalog is empty; nothing to sync");
            return Ok(report);
        }

        info!(
            total_records = report.total_records,
            total_batches = report.total_batches,
            batch_size = batch_size,
            "Fetched catalog records"
        );

        let shutdown_rx = self.shutdown_tx.subscribe();

        for (batch_index, batch) in records.chunks(batch_size).enumerate() {
            if *shutdown_rx.borrow() {
                warn!(batch_index, "Cancellation requested; stopping before next batch");
                report.outcome = SyncOutcome::Cancelled;
                break;
            }

            report.attempted_batches += 1;

            match self.process_batch(batch).await {
                Ok(count) => {
                    report.succeeded_batches += 1;
                    report.records_upserted += count;
                    debug!(batch_index, records = batch.len(), "Batch synced");
                }
                Err(batch_error) => {
                    error!(batch_index, error = %batch_error, "Batch failed");

                    if batch_error.is_fatal() {
                        return Err(SyncError::FatalBatch {
                            batch_index,
                            error: batch_error,
                        });
                    }

                    report.failures.push(BatchFailure {
                        batch_index,
                        first_id: batch[0].id.to_string(),
                        last_id: batch[batch.len() - 1].id.to_string(),
                        record_count: batch.len(),
                        error: batch_error,
                    });
                }
            }
        }

        if report.outcome != SyncOutcome::Cancelled && !report.failures.is_empty() {
            if report.succeeded_batches == 0 {
                return Err(SyncError::AllBatchesFailed { report });
            }
            report.outcome = SyncOutcome::Degraded;
        }

        info!(
            attempted = report.attempted_batches,
            succeeded = report.succeeded_batches,
            failed = report.failed_batches(),
            upserted = report.records_upserted,
            "Catalog sync finished"
        );

        Ok(report)
    }

    /// Embed and upsert one batch of records.
    async fn process_batch(&self, batch: &[Record]) -> Result<usize, BatchError> {
        let ids: Vec<String> = batch.iter().map(|record| record.id.to_string()).collect();
        let texts: Vec<String> = batch.iter().map(projector::project).collect();

        let vectors = self.embedder.embed(&texts).await?;

        if vectors.len() != batch.len() {
            return Err(BatchError::Embedding(EmbeddingError::invalid_response(
                format!("expected {} vectors, got {}", batch.len(), vectors.len()),
            )));
        }

        // The index's declared dimension, not the model's: a mismatch here
        // is a configuration error that must not reach the index.
        let expected = self.provisioner.settings().dimension;
        for vector in &vectors {
            if vector.len() != expected {
                return Err(BatchError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
        }

        let upserts: Vec<UpsertVector> = ids
            .into_iter()
            .zip(vectors)
            .zip(batch)
            .map(|((id, values), record)| UpsertVector {
                id,
                values,
                metadata: metadata_for(record),
            })
            .collect();

        let count = self.index.upsert(&upserts).await?;
        Ok(count)
    }
}

/// Build the flat metadata mapping stored alongside a record's vector.
///
/// Mirrors the record's display fields; the index rejects null values, so a
/// missing primary color is omitted rather than stored as null.
fn metadata_for(record: &Record) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("ProductName".to_string(), json!(record.name));
    metadata.insert("ProductBrand".to_string(), json!(record.brand));
    metadata.insert("Gender".to_string(), json!(record.gender));
    metadata.insert("Price".to_string(), json!(record.price));
    metadata.insert("Description".to_string(), json!(record.description));
    if let Some(ref color) = record.primary_color {
        metadata.insert("PrimaryColor".to_string(), json!(color));
    }
    metadata
}
