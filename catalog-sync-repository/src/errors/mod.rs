//! Error types for the catalog sync repository.

mod embedding_error;
mod index_error;
mod source_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use source_error::SourceError;
