//! # Catalog Sync Shared
//!
//! Shared data types for the catalog vector sync system.
//!
//! The central type is [`Record`], a validated catalog row. Records are
//! produced by the record source, rendered to text by the pipeline's
//! projector, and mirrored into the vector index as upsert metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog record.
///
/// Catalog stores are inconsistent about id column types: some hold the
/// product id as an integer, others as text. Both coerce to the same string
/// via [`fmt::Display`], so the same logical id always maps to the same
/// vector index entry regardless of the source column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id column.
    Int(i64),
    /// Text id column.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        RecordId::Int(id.into())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// One catalog item, validated at the record source boundary.
///
/// `id` is non-null and unique across the record set; it becomes the vector
/// index primary key, so it must be stable across syncs for upserts to
/// overwrite rather than duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable unique identifier.
    pub id: RecordId,
    /// Product display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Target gender segment.
    pub gender: String,
    /// Price in the catalog's currency.
    pub price: f64,
    /// Free-text product description.
    pub description: String,
    /// Primary color, when the catalog has one.
    pub primary_color: Option<String>,
}

impl Record {
    /// Create a record with all required fields.
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        gender: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        primary_color: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            gender: gender.into(),
            price,
            description: description.into(),
            primary_color,
        }
    }
}
