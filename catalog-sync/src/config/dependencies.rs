//! Dependency initialization and wiring for the catalog sync.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::RunError;
use catalog_sync_pipeline::{IndexProvisioner, SyncConfig, SyncOrchestrator};
use catalog_sync_repository::{
    DistanceMetric, EmbeddingClient, GeminiEmbeddings, GeminiEmbeddingsConfig, IndexSettings,
    PineconeConfig, PineconeIndexClient, PostgresRecordSource, ServerlessSpec,
    VectorIndexProvider,
};

/// Default Pinecone index name.
const DEFAULT_INDEX_NAME: &str = "product-catalog-index";

/// Default serverless cloud provider.
const DEFAULT_CLOUD: &str = "aws";

/// Default serverless region.
const DEFAULT_REGION: &str = "us-east-1";

/// Default records per batch.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: SyncOrchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: Postgres connection string (required)
    /// - `GOOGLE_API_KEY`: Gemini API key (required)
    /// - `PINECONE_API_KEY`: Pinecone API key (required)
    /// - `PINECONE_INDEX_NAME`: Index name (default: product-catalog-index)
    /// - `PINECONE_CLOUD`: Serverless cloud (default: aws)
    /// - `PINECONE_REGION`: Serverless region (default: us-east-1)
    /// - `SYNC_BATCH_SIZE`: Records per batch (default: 100)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(RunError)` - If initialization fails
    pub async fn new() -> Result<Self, RunError> {
        let database_url = require_env("DATABASE_URL")?;
        let google_api_key = require_env("GOOGLE_API_KEY")?;
        let pinecone_api_key = require_env("PINECONE_API_KEY")?;

        let index_name =
            env::var("PINECONE_INDEX_NAME").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let cloud = env::var("PINECONE_CLOUD").unwrap_or_else(|_| DEFAULT_CLOUD.to_string());
        let region = env::var("PINECONE_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let batch_size = parse_batch_size(env::var("SYNC_BATCH_SIZE").ok().as_deref())?;

        info!(
            index = %index_name,
            cloud = %cloud,
            region = %region,
            batch_size = batch_size,
            "Initializing dependencies"
        );

        let source = PostgresRecordSource::connect(&database_url).await?;

        let embedder = GeminiEmbeddings::new(GeminiEmbeddingsConfig::new(google_api_key));
        let dimension = embedder.dimension();

        let index_client =
            PineconeIndexClient::new(PineconeConfig::new(pinecone_api_key, &index_name))?;
        let index: Arc<dyn VectorIndexProvider> = Arc::new(index_client);

        let settings = IndexSettings::new(
            index_name,
            dimension,
            DistanceMetric::DotProduct,
            ServerlessSpec::new(cloud, region),
        );
        let provisioner = IndexProvisioner::new(index.clone(), settings);

        let orchestrator = SyncOrchestrator::with_config(
            Arc::new(source),
            Arc::new(embedder),
            index,
            provisioner,
            SyncConfig { batch_size },
        );

        Ok(Self { orchestrator })
    }
}

/// Read a required environment variable.
fn require_env(name: &str) -> Result<String, RunError> {
    env::var(name).map_err(|_| RunError::config(format!("{} must be set", name)))
}

/// Parse the batch size override, defaulting when unset.
fn parse_batch_size(raw: Option<&str>) -> Result<usize, RunError> {
    match raw {
        None => Ok(DEFAULT_BATCH_SIZE),
        Some(value) => match value.parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(RunError::config(format!(
                "SYNC_BATCH_SIZE must be a positive integer, got '{}'",
                value
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_defaults_when_unset() {
        assert_eq!(parse_batch_size(None).unwrap(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn batch_size_parses_override() {
        assert_eq!(parse_batch_size(Some("50")).unwrap(), 50);
    }

    #[test]
    fn batch_size_rejects_zero() {
        assert!(parse_batch_size(Some("0")).is_err());
    }

    #[test]
    fn batch_size_rejects_garbage() {
        assert!(parse_batch_size(Some("many")).is_err());
    }
}
