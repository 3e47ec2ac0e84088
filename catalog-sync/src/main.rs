//! Catalog vector sync entry point.
//!
//! Loads configuration from the environment, wires the pipeline, and runs
//! one sync of the product catalog into the vector index. Ctrl-C requests
//! cooperative cancellation between batches.

use std::sync::Arc;

use tracing::{info, warn};

use catalog_sync::{Dependencies, RunError};
use catalog_sync_pipeline::SyncOutcome;

#[tokio::main]
async fn main() -> Result<(), RunError> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let deps = Dependencies::new().await?;
    let orchestrator = Arc::new(deps.orchestrator);

    let shutdown_handle = orchestrator.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            shutdown_handle.shutdown();
        }
    });

    let report = orchestrator.run().await?;

    match report.outcome {
        SyncOutcome::Completed => {
            info!(
                records = report.records_upserted,
                batches = report.succeeded_batches,
                "Sync completed"
            );
        }
        SyncOutcome::Degraded => {
            warn!(
                succeeded = report.succeeded_batches,
                failed = report.failed_batches(),
                "Sync completed with failed batches"
            );
            for failure in &report.failures {
                warn!(
                    batch_index = failure.batch_index,
                    first_id = %failure.first_id,
                    last_id = %failure.last_id,
                    error = %failure.error,
                    "Failed batch"
                );
            }
        }
        SyncOutcome::Cancelled => {
            warn!(
                attempted = report.attempted_batches,
                total = report.total_batches,
                "Sync cancelled before completion"
            );
        }
    }

    Ok(())
}
