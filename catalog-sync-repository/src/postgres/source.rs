//! Postgres record source implementation.
//!
//! Performs a single bulk `SELECT` over the products table and validates
//! every row at this boundary, so malformed catalog data surfaces as a
//! [`SourceError::MalformedRecord`] instead of a bug further down the
//! pipeline.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::{debug, info, instrument};

use crate::errors::SourceError;
use crate::interfaces::RecordSource;
use catalog_sync_shared::{Record, RecordId};

/// Default products table name.
const DEFAULT_TABLE: &str = "products";

/// Maximum connections held by the source's pool.
const MAX_CONNECTIONS: u32 = 5;

/// Record source backed by a Postgres products table.
///
/// # Example
///
/// ```ignore
/// let source = PostgresRecordSource::connect("postgres://postgres@localhost/product_catalog_db").await?;
/// let records = source.fetch_all_records().await?;
/// ```
pub struct PostgresRecordSource {
    pool: PgPool,
    table: String,
}

impl PostgresRecordSource {
    /// Create a source over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Use a custom products table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Connect to the catalog database and create a source.
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresRecordSource)` - A connected source
    /// * `Err(SourceError::Unavailable)` - If the database cannot be reached
    pub async fn connect(database_url: &str) -> Result<Self, SourceError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| SourceError::unavailable(e.to_string()))?;

        info!(table = DEFAULT_TABLE, "Connected to catalog database");

        Ok(Self::new(pool))
    }

    /// The query pulling all catalog rows.
    ///
    /// `price` is cast to float8 so numeric columns decode uniformly.
    fn select_query(&self) -> String {
        format!(
            "SELECT productid, productname, productbrand, gender, \
             price::float8 AS price, description, primarycolor \
             FROM {}",
            self.table
        )
    }
}

#[async_trait]
impl RecordSource for PostgresRecordSource {
    #[instrument(skip(self))]
    async fn fetch_all_records(&self) -> Result<Vec<Record>, SourceError> {
        let rows = sqlx::query(&self.select_query())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_) => {
                    SourceError::unavailable(e.to_string())
                }
                other => SourceError::query(other.to_string()),
            })?;

        let mut records = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            // The id column may be bigint, integer, or text depending on how
            // the catalog was loaded; sqlx will not widen int4 to i64, so
            // each width is tried before falling back to text. All coerce to
            // the same RecordId string.
            let id = match row.try_get::<Option<i64>, _>("productid") {
                Ok(id) => id.map(RecordId::Int),
                Err(_) => match row.try_get::<Option<i32>, _>("productid") {
                    Ok(id) => id.map(RecordId::from),
                    Err(_) => row
                        .try_get::<Option<String>, _>("productid")
                        .map_err(|e| {
                            SourceError::malformed(format!("row {}: productid: {}", row_index, e))
                        })?
                        .map(RecordId::Text),
                },
            };

            let raw = ProductRow {
                id,
                name: decode(row, "productname", row_index)?,
                brand: decode(row, "productbrand", row_index)?,
                gender: decode(row, "gender", row_index)?,
                price: decode(row, "price", row_index)?,
                description: decode(row, "description", row_index)?,
                primary_color: decode(row, "primarycolor", row_index)?,
            };

            records.push(raw.validate(row_index)?);
        }

        debug!(count = records.len(), "Fetched catalog records");
        Ok(records)
    }
}

/// Decode a nullable column, mapping decode failures to `MalformedRecord`.
fn decode<'r, T>(
    row: &'r sqlx::postgres::PgRow,
    column: &str,
    row_index: usize,
) -> Result<Option<T>, SourceError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get::<Option<T>, _>(column)
        .map_err(|e| SourceError::malformed(format!("row {}: {}: {}", row_index, column, e)))
}

/// A raw catalog row before boundary validation.
#[derive(Debug, Default)]
struct ProductRow {
    id: Option<RecordId>,
    name: Option<String>,
    brand: Option<String>,
    gender: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    primary_color: Option<String>,
}

impl ProductRow {
    /// Validate required fields, producing a `Record` or failing fast.
    ///
    /// Only `primary_color` is optional; the catalog has rows with no
    /// recorded color.
    fn validate(self, row_index: usize) -> Result<Record, SourceError> {
        let missing = |field: &str| {
            SourceError::malformed(format!("row {}: missing required field '{}'", row_index, field))
        };

        Ok(Record {
            id: self.id.ok_or_else(|| missing("productid"))?,
            name: self.name.ok_or_else(|| missing("productname"))?,
            brand: self.brand.ok_or_else(|| missing("productbrand"))?,
            gender: self.gender.ok_or_else(|| missing("gender"))?,
            price: self.price.ok_or_else(|| missing("price"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            primary_color: self.primary_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> ProductRow {
        ProductRow {
            id: Some(RecordId::Int(10017413)),
            name: Some("DKNY Unisex Black Large Trolley Bag".to_string()),
            brand: Some("DKNY".to_string()),
            gender: Some("Unisex".to_string()),
            price: Some(11745.0),
            description: Some("Black and grey printed trolley bag".to_string()),
            primary_color: Some("Black".to_string()),
        }
    }

    #[test]
    fn validate_accepts_full_row() {
        let record = full_row().validate(0).unwrap();
        assert_eq!(record.id.to_string(), "10017413");
        assert_eq!(record.primary_color.as_deref(), Some("Black"));
    }

    #[test]
    fn validate_allows_missing_primary_color() {
        let mut row = full_row();
        row.primary_color = None;

        let record = row.validate(3).unwrap();
        assert!(record.primary_color.is_none());
    }

    #[test]
    fn validate_rejects_null_id() {
        let mut row = full_row();
        row.id = None;

        let err = row.validate(7).unwrap_err();
        assert!(matches!(err, SourceError::MalformedRecord(_)));
        assert!(err.to_string().contains("productid"));
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn validate_rejects_null_required_text_field() {
        let mut row = full_row();
        row.description = None;

        let err = row.validate(0).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    fn lazy_source() -> PostgresRecordSource {
        // connect_lazy opens no connection but spawns pool maintenance
        // tasks, so callers need a tokio runtime.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/product_catalog_db")
            .unwrap();
        PostgresRecordSource::new(pool)
    }

    #[tokio::test]
    async fn select_query_uses_default_table() {
        let query = lazy_source().select_query();
        assert!(query.contains("FROM products"));
        assert!(query.contains("price::float8"));
    }

    #[tokio::test]
    async fn select_query_uses_configured_table() {
        let query = lazy_source().with_table("catalog_2024").select_query();
        assert!(query.contains("FROM catalog_2024"));
    }
}
