//! Interface definitions for the sync pipeline's external collaborators.
//!
//! These traits allow dependency injection and swappable backend
//! implementations: the orchestrator only ever sees a record source, an
//! embedding client, and a vector index provider.

mod embedding_client;
mod record_source;
mod vector_index_provider;

pub use embedding_client::EmbeddingClient;
pub use record_source::RecordSource;
pub use vector_index_provider::VectorIndexProvider;
