use async_trait::async_trait;
use intern_model::{Entity, Stored, Year};

use crate::error::Result;
use crate::outcome::{BulkWriteOutcome, RecordUpdate};

/// Year-bucketed persistence for one entity type.
///
/// Every call either completes (possibly rejecting individual records in the
/// returned outcome) or fails as a whole with an `Err`.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Records stored for `year`; empty when the bucket does not exist.
    async fn find_by_year(&self, year: &Year) -> Result<Vec<Stored<E>>>;

    /// Creates the bucket for `year` if it is missing.
    async fn ensure_year_bucket(&self, year: &Year) -> Result<()>;

    /// Inserts records, rejecting those whose natural key is already taken.
    async fn bulk_insert(&self, year: &Year, records: Vec<Stored<E>>) -> Result<BulkWriteOutcome>;

    /// Patches existing records matched by natural key, stamping `updatedAt`.
    async fn bulk_update(
        &self,
        year: &Year,
        updates: Vec<RecordUpdate<E>>,
    ) -> Result<BulkWriteOutcome>;

    /// Total records across all years.
    async fn count_all(&self) -> Result<usize>;

    /// Years that have a bucket, ascending.
    async fn years(&self) -> Result<Vec<Year>>;

    /// Every record across all years.
    async fn find_all(&self) -> Result<Vec<Stored<E>>> {
        let mut records = Vec::new();
        for year in self.years().await? {
            records.extend(self.find_by_year(&year).await?);
        }
        Ok(records)
    }
}
