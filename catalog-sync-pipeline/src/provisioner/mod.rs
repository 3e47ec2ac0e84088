//! Index provisioner for the catalog sync pipeline.
//!
//! Ensures the target vector index exists with the configured dimension and
//! metric before any upsert. Provisioning is check-before-create: an
//! existing index is never recreated or altered, so the step is safe to run
//! at the start of every sync.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use catalog_sync_repository::{IndexError, IndexSettings, VectorIndexProvider};

/// Configuration for the index provisioner.
#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
    /// Interval between readiness polls after creating the index.
    pub poll_interval: Duration,
    /// Maximum time to wait for a newly created index to become ready.
    pub ready_timeout: Duration,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            ready_timeout: Duration::from_secs(300),
        }
    }
}

/// Provisioner that ensures the vector index exists and is ready.
pub struct IndexProvisioner {
    provider: Arc<dyn VectorIndexProvider>,
    settings: IndexSettings,
    config: ProvisionerConfig,
}

impl IndexProvisioner {
    /// Create a provisioner for the given index settings.
    pub fn new(provider: Arc<dyn VectorIndexProvider>, settings: IndexSettings) -> Self {
        Self {
            provider,
            settings,
            config: ProvisionerConfig::default(),
        }
    }

    /// Create a provisioner with custom polling configuration.
    pub fn with_config(
        provider: Arc<dyn VectorIndexProvider>,
        settings: IndexSettings,
        config: ProvisionerConfig,
    ) -> Self {
        Self {
            provider,
            settings,
            config,
        }
    }

    /// The index settings this provisioner enforces.
    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Ensure the index exists and is ready to serve writes.
    ///
    /// If the index already exists it is never recreated or altered,
    /// but its declared dimension and metric are compared against
    /// the configured settings and a warning is emitted on disagreement,
    /// since upserts into a mismatched index fail or corrupt retrieval.
    ///
    /// If the index is absent it is created, then polled for readiness until
    /// the configured timeout.
    #[instrument(skip(self), fields(index = %self.settings.name))]
    pub async fn ensure_ready(&self) -> Result<(), IndexError> {
        let existing = self.provider.list_indexes().await?;

        if existing.iter().any(|name| name == &self.settings.name) {
            self.check_existing().await;
            info!("Index already exists");
            return Ok(());
        }

        info!(
            dimension = self.settings.dimension,
            metric = %self.settings.metric,
            "Creating index"
        );
        self.provider.create_index(&self.settings).await?;

        self.wait_until_ready().await
    }

    /// Compare an existing index's declared schema against the settings.
    async fn check_existing(&self) {
        let description = match self.provider.describe_index(&self.settings.name).await {
            Ok(description) => description,
            Err(e) => {
                warn!(error = %e, "Could not describe existing index");
                return;
            }
        };

        if let Some(dimension) = description.dimension {
            if dimension != self.settings.dimension {
                warn!(
                    declared = dimension,
                    configured = self.settings.dimension,
                    "Existing index dimension does not match the embedding model"
                );
            }
        }

        if let Some(metric) = description.metric {
            if metric != self.settings.metric {
                warn!(
                    declared = %metric,
                    configured = %self.settings.metric,
                    "Existing index metric does not match the configured metric"
                );
            }
        }
    }

    /// Poll readiness at a fixed interval until ready or timed out.
    async fn wait_until_ready(&self) -> Result<(), IndexError> {
        let started = Instant::now();

        loop {
            let description = self.provider.describe_index(&self.settings.name).await?;
            if description.ready {
                info!(
                    waited_ms = started.elapsed().as_millis() as u64,
                    "Index is ready"
                );
                return Ok(());
            }

            if started.elapsed() >= self.config.ready_timeout {
                return Err(IndexError::ProvisioningTimeout {
                    name: self.settings.name.clone(),
                    waited_secs: self.config.ready_timeout.as_secs(),
                });
            }

            debug!("Index not ready yet; polling again");
            sleep(self.config.poll_interval).await;
        }
    }
}
