//! Vector index provider trait definition.
//!
//! This module defines the abstract interface for vector index operations,
//! allowing for different backend implementations (Pinecone, an in-memory
//! test double, etc.).

use async_trait::async_trait;

use crate::errors::IndexError;
use crate::types::{IndexDescription, IndexSettings, UpsertVector};

/// Abstracts the underlying vector index service.
///
/// Implementations are injected into the pipeline's provisioner and
/// orchestrator to enable testing with mock indexes. All methods return
/// `Result<T, IndexError>` for consistent error handling across backends.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// List the names of all existing indexes.
    async fn list_indexes(&self) -> Result<Vec<String>, IndexError>;

    /// Create an index with the given settings.
    ///
    /// Creation is asynchronous on the service side; callers poll
    /// [`describe_index`](Self::describe_index) for readiness.
    async fn create_index(&self, settings: &IndexSettings) -> Result<(), IndexError>;

    /// Describe an existing index (readiness, declared dimension/metric).
    async fn describe_index(&self, name: &str) -> Result<IndexDescription, IndexError>;

    /// Upsert a batch of vectors into the index.
    ///
    /// Upsert is idempotent per id: re-upserting an id overwrites its
    /// vector and metadata, which is how re-running the whole pipeline
    /// reconciles changed catalog data without explicit diffing.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of vectors written
    async fn upsert(&self, vectors: &[UpsertVector]) -> Result<usize, IndexError>;
}
