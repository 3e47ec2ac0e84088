//! # Catalog Sync Repository
//!
//! This crate provides the boundary traits for the catalog vector sync
//! pipeline's external collaborators (the relational record source, the
//! embedding service, and the vector index) together with concrete
//! implementations: Postgres, the Gemini embedding API, and Pinecone.

pub mod errors;
pub mod gemini;
pub mod interfaces;
pub mod pinecone;
pub mod postgres;
pub mod types;

pub use errors::{EmbeddingError, IndexError, SourceError};
pub use gemini::{GeminiEmbeddings, GeminiEmbeddingsConfig};
pub use interfaces::{EmbeddingClient, RecordSource, VectorIndexProvider};
pub use pinecone::{PineconeConfig, PineconeIndexClient};
pub use postgres::PostgresRecordSource;
pub use types::{DistanceMetric, IndexDescription, IndexSettings, ServerlessSpec, UpsertVector};
