//! Embedding client trait definition.

use async_trait::async_trait;

use crate::errors::EmbeddingError;

/// Abstracts the external embedding model.
///
/// The contract is order-preserving: position `i` of the output corresponds
/// to position `i` of the input, and the output length equals the input
/// length. Callers rely on zipping ids, texts, and vectors by index.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed an ordered sequence of texts.
    ///
    /// Implementations may internally chunk requests to respect the
    /// service's maximum batch size, transparently to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Vec<f32>>)` - One vector per input text, in input order
    /// * `Err(EmbeddingError::InvalidInput)` - If `texts` is empty
    /// * `Err(EmbeddingError)` - Auth, rate-limit, or network failure; the
    ///   orchestrator decides retry policy, not the client
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Output dimension of the underlying model.
    fn dimension(&self) -> usize;
}
