use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use intern_model::{Entity, Stored, Year};
use tokio::sync::Mutex;
use tracing::debug;

use crate::bucket::YearBucket;
use crate::error::{Result, StoreError};
use crate::io::{json_stems, read_optional, write_atomic};
use crate::outcome::{BulkWriteOutcome, RecordUpdate};
use crate::store::EntityStore;

/// Document store keeping one JSON file per year under `{root}/{kind}/`.
///
/// Buckets are loaded on first use and cached. Every write replaces the whole
/// year file atomically; the cache is only updated once the file is on disk,
/// so a failed write leaves both untouched.
#[derive(Debug)]
pub struct JsonFileStore<E> {
    dir: PathBuf,
    cache: Mutex<BTreeMap<Year, YearBucket<E>>>,
}

impl<E: Entity> JsonFileStore<E> {
    pub fn new(root: &Path) -> Self {
        Self {
            dir: root.join(E::KIND.as_str()),
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn bucket_path(&self, year: &Year) -> PathBuf {
        self.dir.join(format!("{year}.json"))
    }

    async fn load(&self, year: &Year) -> Result<Option<YearBucket<E>>> {
        let path = self.bucket_path(year);
        let read_path = path.clone();
        let bytes = tokio::task::spawn_blocking(move || read_optional(&read_path))
            .await
            .map_err(|source| StoreError::Background { source })??;
        let Some(bytes) = bytes else {
            return Ok(None);
        };
        let bucket = serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Deserialization { path, source })?;
        debug!(kind = %E::KIND, %year, "year bucket loaded");
        Ok(Some(bucket))
    }

    async fn persist(&self, bucket: &YearBucket<E>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(bucket)
            .map_err(|source| StoreError::Serialization { source })?;
        let path = self.bucket_path(&bucket.annee);
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|source| StoreError::Background { source })?
    }

    /// Cached bucket for `year`, loading it from disk when needed.
    async fn bucket(
        &self,
        cache: &mut BTreeMap<Year, YearBucket<E>>,
        year: &Year,
    ) -> Result<Option<YearBucket<E>>> {
        if let Some(bucket) = cache.get(year) {
            return Ok(Some(bucket.clone()));
        }
        let loaded = self.load(year).await?;
        if let Some(bucket) = &loaded {
            cache.insert(year.clone(), bucket.clone());
        }
        Ok(loaded)
    }

    async fn write_with<F>(&self, year: &Year, change: F) -> Result<BulkWriteOutcome>
    where
        F: FnOnce(&mut YearBucket<E>) -> BulkWriteOutcome + Send,
    {
        let mut cache = self.cache.lock().await;
        let mut bucket = self
            .bucket(&mut cache, year)
            .await?
            .unwrap_or_else(|| YearBucket::new(year.clone()));
        let outcome = change(&mut bucket);
        if outcome.succeeded > 0 {
            self.persist(&bucket).await?;
            cache.insert(year.clone(), bucket);
        }
        Ok(outcome)
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for JsonFileStore<E> {
    async fn find_by_year(&self, year: &Year) -> Result<Vec<Stored<E>>> {
        let mut cache = self.cache.lock().await;
        Ok(self
            .bucket(&mut cache, year)
            .await?
            .map(|bucket| bucket.records)
            .unwrap_or_default())
    }

    async fn ensure_year_bucket(&self, year: &Year) -> Result<()> {
        let mut cache = self.cache.lock().await;
        if self.bucket(&mut cache, year).await?.is_some() {
            return Ok(());
        }
        let bucket = YearBucket::new(year.clone());
        self.persist(&bucket).await?;
        cache.insert(year.clone(), bucket);
        Ok(())
    }

    async fn bulk_insert(&self, year: &Year, records: Vec<Stored<E>>) -> Result<BulkWriteOutcome> {
        self.write_with(year, move |bucket| bucket.insert_many(records))
            .await
    }

    async fn bulk_update(
        &self,
        year: &Year,
        updates: Vec<RecordUpdate<E>>,
    ) -> Result<BulkWriteOutcome> {
        let now = Utc::now();
        self.write_with(year, move |bucket| bucket.update_many(updates, now))
            .await
    }

    async fn count_all(&self) -> Result<usize> {
        let mut total = 0;
        for year in self.years().await? {
            total += self.find_by_year(&year).await?.len();
        }
        Ok(total)
    }

    async fn years(&self) -> Result<Vec<Year>> {
        let dir = self.dir.clone();
        let stems = tokio::task::spawn_blocking(move || json_stems(&dir))
            .await
            .map_err(|source| StoreError::Background { source })??;
        let mut years: Vec<Year> = stems
            .into_iter()
            .filter_map(|stem| Year::new(stem).ok())
            .collect();
        let cache = self.cache.lock().await;
        years.extend(cache.keys().cloned());
        years.sort();
        years.dedup();
        Ok(years)
    }
}
