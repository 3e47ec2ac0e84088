//! Gemini embedding client implementation.
//!
//! Calls the Generative Language API's `batchEmbedContents` endpoint. The
//! service caps the number of texts per request, so the client chunks large
//! inputs internally; callers always see one output vector per input text,
//! in input order.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::errors::EmbeddingError;
use crate::interfaces::EmbeddingClient;

/// Configuration for [`GeminiEmbeddings`].
#[derive(Debug, Clone)]
pub struct GeminiEmbeddingsConfig {
    /// Google API key.
    pub api_key: String,
    /// Model name (default: `"models/embedding-001"`).
    pub model: String,
    /// Base URL (default: `"https://generativelanguage.googleapis.com/v1beta"`).
    pub base_url: String,
    /// Output dimension of the model (default: 768).
    pub dimension: usize,
    /// Maximum texts per request accepted by the service (default: 100).
    pub max_request_size: usize,
}

impl GeminiEmbeddingsConfig {
    /// Create a config with the required API key and defaults for the rest.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "models/embedding-001".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            dimension: 768,
            max_request_size: 100,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

/// Embedding client backed by the Gemini embedding models.
///
/// `models/embedding-001` produces 768-dimension vectors, which must match
/// the vector index's declared dimension.
pub struct GeminiEmbeddings {
    config: GeminiEmbeddingsConfig,
    client: reqwest::Client,
}

impl GeminiEmbeddings {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiEmbeddingsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &GeminiEmbeddingsConfig {
        &self.config
    }

    /// Full URL of the batch embed endpoint.
    fn batch_embed_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}/{}:batchEmbedContents", base, self.config.model)
    }

    /// Request body for one chunk of texts.
    fn build_request_body(&self, texts: &[String]) -> Value {
        let requests: Vec<Value> = texts
            .iter()
            .map(|text| {
                json!({
                    "model": self.config.model,
                    "content": { "parts": [{ "text": text }] },
                })
            })
            .collect();

        json!({ "requests": requests })
    }

    /// Embed one service-sized chunk of texts.
    async fn embed_chunk(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let response = self
            .client
            .post(self.batch_embed_url())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(texts))
            .send()
            .await
            .map_err(|e| EmbeddingError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| EmbeddingError::invalid_response(e.to_string()))?;

        parse_embeddings(&body, texts.len())
    }
}

/// Map a non-success HTTP status to the error taxonomy.
///
/// 401/403 are authentication-class and fatal; everything else is scoped to
/// the batch that hit it.
fn classify_status(status: u16, message: String) -> EmbeddingError {
    match status {
        401 | 403 => EmbeddingError::authentication(format!("HTTP {}: {}", status, message)),
        429 => EmbeddingError::rate_limited(message),
        _ => EmbeddingError::Service { status, message },
    }
}

/// Extract the embedding vectors from a `batchEmbedContents` response.
fn parse_embeddings(body: &Value, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let embeddings = body
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| EmbeddingError::invalid_response("missing 'embeddings' field"))?;

    if embeddings.len() != expected {
        return Err(EmbeddingError::invalid_response(format!(
            "expected {} embeddings, got {}",
            expected,
            embeddings.len()
        )));
    }

    let mut vectors = Vec::with_capacity(embeddings.len());
    for embedding in embeddings {
        let values = embedding
            .get("values")
            .and_then(|v| v.as_array())
            .ok_or_else(|| EmbeddingError::invalid_response("embedding missing 'values'"))?;

        let vector: Vec<f32> = values
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| EmbeddingError::invalid_response("non-numeric vector value"))
            })
            .collect::<Result<_, _>>()?;

        vectors.push(vector);
    }

    Ok(vectors)
}

#[async_trait]
impl EmbeddingClient for GeminiEmbeddings {
    #[instrument(skip(self, texts), fields(text_count = texts.len()))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Err(EmbeddingError::invalid_input("empty text sequence"));
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.max_request_size) {
            let mut chunk_vectors = self.embed_chunk(chunk).await?;
            vectors.append(&mut chunk_vectors);
        }

        debug!(vector_count = vectors.len(), "Embedded texts");
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
