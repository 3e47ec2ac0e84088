//! Request and configuration types for the vector index boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Similarity metric used by the vector index.
///
/// Must match the geometry the embedding model was trained for; the
/// provisioner creates the index with this metric and warns when an existing
/// index disagrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Dot product similarity.
    #[serde(rename = "dotproduct")]
    DotProduct,
    /// Cosine similarity.
    Cosine,
    /// Euclidean distance.
    Euclidean,
}

impl DistanceMetric {
    /// Wire name of the metric as the index API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::DotProduct => "dotproduct",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
        }
    }

    /// Parse a wire name back into a metric.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dotproduct" => Some(DistanceMetric::DotProduct),
            "cosine" => Some(DistanceMetric::Cosine),
            "euclidean" => Some(DistanceMetric::Euclidean),
            _ => None,
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serverless hosting configuration for a managed vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerlessSpec {
    /// Cloud provider (e.g. "aws").
    pub cloud: String,
    /// Provider region (e.g. "us-east-1").
    pub region: String,
}

impl ServerlessSpec {
    /// Create a spec for the given cloud and region.
    pub fn new(cloud: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            cloud: cloud.into(),
            region: region.into(),
        }
    }
}

/// Desired configuration of the target vector index.
///
/// `dimension` must equal the embedding model's output size; a mismatch is a
/// configuration error, not a per-record one.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSettings {
    /// Index name, non-empty.
    pub name: String,
    /// Vector dimension, positive.
    pub dimension: usize,
    /// Similarity metric.
    pub metric: DistanceMetric,
    /// Hosting configuration.
    pub spec: ServerlessSpec,
}

impl IndexSettings {
    /// Create settings for the given index.
    pub fn new(
        name: impl Into<String>,
        dimension: usize,
        metric: DistanceMetric,
        spec: ServerlessSpec,
    ) -> Self {
        Self {
            name: name.into(),
            dimension,
            metric,
            spec,
        }
    }
}

/// What the index service reports about an existing index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDescription {
    /// Whether the index is ready to serve writes.
    pub ready: bool,
    /// Declared dimension, when the service reports one.
    pub dimension: Option<usize>,
    /// Declared metric, when the service reports one.
    pub metric: Option<DistanceMetric>,
    /// Data-plane host for the index, when the service reports one.
    pub host: Option<String>,
}

/// One `(id, vector, metadata)` triple bound for the vector index.
///
/// `metadata` is a flat mapping of scalar display fields mirroring the
/// source record minus the embedded text itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertVector {
    /// Index primary key; re-upserting the same id overwrites.
    pub id: String,
    /// Embedding vector.
    pub values: Vec<f32>,
    /// Flat scalar metadata stored alongside the vector.
    pub metadata: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_wire_names() {
        assert_eq!(DistanceMetric::DotProduct.as_str(), "dotproduct");
        assert_eq!(DistanceMetric::Cosine.as_str(), "cosine");
        assert_eq!(DistanceMetric::Euclidean.as_str(), "euclidean");
    }

    #[test]
    fn metric_parse_round_trip() {
        for metric in [
            DistanceMetric::DotProduct,
            DistanceMetric::Cosine,
            DistanceMetric::Euclidean,
        ] {
            assert_eq!(DistanceMetric::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(DistanceMetric::parse("manhattan"), None);
    }

    #[test]
    fn settings_new_sets_fields() {
        let settings = IndexSettings::new(
            "product-catalog-index",
            768,
            DistanceMetric::DotProduct,
            ServerlessSpec::new("aws", "us-east-1"),
        );

        assert_eq!(settings.name, "product-catalog-index");
        assert_eq!(settings.dimension, 768);
        assert_eq!(settings.spec.region, "us-east-1");
    }
}
