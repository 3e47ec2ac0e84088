//! Pinecone client implementation.
//!
//! Index management (`list`, `create`, `describe`) goes through the control
//! plane at `api.pinecone.io`; vector upserts go to the index's own data
//! plane host, which the control plane reports in `describe_index`. The
//! data plane host is resolved once per client and cached.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use url::Url;

use crate::errors::IndexError;
use crate::interfaces::VectorIndexProvider;
use crate::types::{DistanceMetric, IndexDescription, IndexSettings, UpsertVector};

/// Default control plane URL.
const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

/// Configuration for connecting to Pinecone.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// Pinecone API key.
    pub api_key: String,
    /// Name of the index this client writes to.
    pub index_name: String,
    /// Control plane URL (default: `https://api.pinecone.io`).
    pub controller_url: String,
    /// Data plane host override; when unset, resolved via `describe_index`.
    pub host: Option<String>,
}

impl PineconeConfig {
    /// Create a config for the given API key and index.
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            host: None,
        }
    }

    /// Use a custom control plane URL.
    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = url.into();
        self
    }

    /// Pin the data plane host instead of resolving it via describe.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Vector index client backed by the Pinecone REST API.
pub struct PineconeIndexClient {
    config: PineconeConfig,
    client: reqwest::Client,
    resolved_host: OnceCell<String>,
}

impl PineconeIndexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(PineconeIndexClient)` - A new client instance
    /// * `Err(IndexError::ConnectionError)` - If the controller URL is invalid
    pub fn new(config: PineconeConfig) -> Result<Self, IndexError> {
        Url::parse(&config.controller_url)
            .map_err(|e| IndexError::connection(format!("invalid controller URL: {}", e)))?;

        info!(
            index = %config.index_name,
            controller = %config.controller_url,
            "Created Pinecone client"
        );

        Ok(Self {
            config,
            client: reqwest::Client::new(),
            resolved_host: OnceCell::new(),
        })
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &PineconeConfig {
        &self.config
    }

    /// Build a control plane URL for the given path.
    fn controller_url(&self, path: &str) -> String {
        let base = self.config.controller_url.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Send a control plane request and return the parsed JSON body.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        op: &'static str,
    ) -> Result<Value, IndexError> {
        let response = request
            .header("Api-Key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| IndexError::connection(format!("{}: {}", op, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IndexError::parse(format!("{}: {}", op, e)))?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), op, text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| IndexError::parse(format!("{}: {}", op, e)))
    }

    /// Resolve the data plane base URL for this client's index.
    async fn data_plane_url(&self) -> Result<&str, IndexError> {
        self.resolved_host
            .get_or_try_init(|| async {
                if let Some(ref host) = self.config.host {
                    return Ok(normalize_host(host));
                }

                let description = self.describe_index(&self.config.index_name).await?;
                let host = description
                    .host
                    .ok_or_else(|| IndexError::NotFound(self.config.index_name.clone()))?;

                debug!(host = %host, "Resolved data plane host");
                Ok(normalize_host(&host))
            })
            .await
            .map(String::as_str)
    }
}

/// Map a non-success HTTP status to the error taxonomy.
fn classify_status(status: u16, op: &str, message: String) -> IndexError {
    match status {
        401 | 403 => IndexError::authentication(format!("{} (HTTP {}): {}", op, status, message)),
        404 => IndexError::NotFound(message),
        _ => match op {
            "create_index" => {
                IndexError::create(format!("HTTP {}: {}", status, message))
            }
            "upsert" => IndexError::write(format!("HTTP {}: {}", status, message)),
            _ => IndexError::connection(format!("{} (HTTP {}): {}", op, status, message)),
        },
    }
}

/// The control plane reports hosts without a scheme.
fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

/// Parse a control plane index description.
fn parse_description(body: &Value) -> IndexDescription {
    IndexDescription {
        ready: body["status"]["ready"].as_bool().unwrap_or(false),
        dimension: body["dimension"].as_u64().map(|d| d as usize),
        metric: body["metric"].as_str().and_then(DistanceMetric::parse),
        host: body["host"].as_str().map(String::from),
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeIndexClient {
    async fn list_indexes(&self) -> Result<Vec<String>, IndexError> {
        let body = self
            .send(self.client.get(self.controller_url("/indexes")), "list_indexes")
            .await?;

        let names = body["indexes"]
            .as_array()
            .map(|indexes| {
                indexes
                    .iter()
                    .filter_map(|index| index["name"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(names)
    }

    #[instrument(skip(self, settings), fields(index = %settings.name))]
    async fn create_index(&self, settings: &IndexSettings) -> Result<(), IndexError> {
        let body = json!({
            "name": settings.name,
            "dimension": settings.dimension,
            "metric": settings.metric.as_str(),
            "spec": {
                "serverless": {
                    "cloud": settings.spec.cloud,
                    "region": settings.spec.region,
                }
            }
        });

        self.send(
            self.client.post(self.controller_url("/indexes")).json(&body),
            "create_index",
        )
        .await?;

        info!(index = %settings.name, dimension = settings.dimension, "Created index");
        Ok(())
    }

    async fn describe_index(&self, name: &str) -> Result<IndexDescription, IndexError> {
        let body = self
            .send(
                self.client
                    .get(self.controller_url(&format!("/indexes/{}", name))),
                "describe_index",
            )
            .await?;

        Ok(parse_description(&body))
    }

    #[instrument(skip(self, vectors), fields(vector_count = vectors.len()))]
    async fn upsert(&self, vectors: &[UpsertVector]) -> Result<usize, IndexError> {
        if vectors.is_empty() {
            return Ok(0);
        }

        let base = self.data_plane_url().await?;
        let url = format!("{}/vectors/upsert", base);

        let body = json!({ "vectors": vectors });
        let response = self
            .send(self.client.post(url).json(&body), "upsert")
            .await?;

        let count = response["upsertedCount"]
            .as_u64()
            .map(|c| c as usize)
            .unwrap_or(vectors.len());

        debug!(count = count, "Upserted vectors");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn client() -> PineconeIndexClient {
        PineconeIndexClient::new(PineconeConfig::new("key", "product-catalog-index")).unwrap()
    }

    #[test]
    fn new_rejects_invalid_controller_url() {
        let config =
            PineconeConfig::new("key", "product-catalog-index").with_controller_url("not a url");
        assert!(PineconeIndexClient::new(config).is_err());
    }

    #[test]
    fn controller_url_construction() {
        assert_eq!(
            client().controller_url("/indexes"),
            "https://api.pinecone.io/indexes"
        );
    }

    #[test]
    fn controller_url_trailing_slash() {
        let config = PineconeConfig::new("key", "idx").with_controller_url("http://localhost:9090/");
        let client = PineconeIndexClient::new(config).unwrap();
        assert_eq!(
            client.controller_url("/indexes/idx"),
            "http://localhost:9090/indexes/idx"
        );
    }

    #[test]
    fn normalize_host_adds_scheme() {
        assert_eq!(
            normalize_host("my-index-abc123.svc.pinecone.io"),
            "https://my-index-abc123.svc.pinecone.io"
        );
    }

    #[test]
    fn normalize_host_keeps_existing_scheme() {
        assert_eq!(
            normalize_host("http://localhost:9090/"),
            "http://localhost:9090"
        );
    }

    #[test]
    fn parse_description_full() {
        let body = json!({
            "status": { "ready": true },
            "dimension": 768,
            "metric": "dotproduct",
            "host": "my-index.svc.pinecone.io",
        });

        let description = parse_description(&body);
        assert!(description.ready);
        assert_eq!(description.dimension, Some(768));
        assert_eq!(description.metric, Some(DistanceMetric::DotProduct));
        assert_eq!(description.host.as_deref(), Some("my-index.svc.pinecone.io"));
    }

    #[test]
    fn parse_description_not_ready() {
        let description = parse_description(&json!({ "status": { "ready": false } }));
        assert!(!description.ready);
        assert!(description.dimension.is_none());
        assert!(description.metric.is_none());
    }

    #[test]
    fn status_classification() {
        assert!(classify_status(401, "upsert", String::new()).is_fatal());
        assert!(classify_status(403, "list_indexes", String::new()).is_fatal());
        assert!(!classify_status(500, "upsert", String::new()).is_fatal());
        assert!(matches!(
            classify_status(500, "upsert", String::new()),
            IndexError::WriteError(_)
        ));
        assert!(matches!(
            classify_status(422, "create_index", String::new()),
            IndexError::CreateError(_)
        ));
    }

    #[test]
    fn upsert_vector_serializes_to_wire_shape() {
        let mut metadata = Map::new();
        metadata.insert("ProductName".to_string(), json!("Trolley Bag"));

        let vector = UpsertVector {
            id: "10017413".to_string(),
            values: vec![0.1, 0.2],
            metadata,
        };

        let wire = serde_json::to_value(&vector).unwrap();
        assert_eq!(wire["id"], "10017413");
        assert_eq!(wire["values"].as_array().unwrap().len(), 2);
        assert_eq!(wire["metadata"]["ProductName"], "Trolley Bag");
    }
}
