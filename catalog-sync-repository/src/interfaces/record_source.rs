//! Record source trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use catalog_sync_shared::Record;

/// Abstracts the relational catalog store the sync reads from.
///
/// The pipeline performs a single bulk pull per run; pagination is not
/// required at catalog scale. Implementations validate rows at this boundary
/// and fail fast with [`SourceError::MalformedRecord`] rather than letting
/// malformed data propagate into the pipeline.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every catalog record to synchronize.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Record>)` - All records, in source order
    /// * `Err(SourceError::Unavailable)` - If the store cannot be reached;
    ///   this aborts the entire sync before any batch work begins
    async fn fetch_all_records(&self) -> Result<Vec<Record>, SourceError>;
}
