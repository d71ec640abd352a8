use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use intern_model::{Entity, Stored, Year};
use tokio::sync::RwLock;

use crate::bucket::YearBucket;
use crate::error::Result;
use crate::outcome::{BulkWriteOutcome, RecordUpdate};
use crate::store::EntityStore;

/// Store keeping every bucket in memory; used for dry runs and tests.
#[derive(Debug)]
pub struct MemoryStore<E> {
    buckets: RwLock<BTreeMap<Year, YearBucket<E>>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn find_by_year(&self, year: &Year) -> Result<Vec<Stored<E>>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(year)
            .map(|bucket| bucket.records.clone())
            .unwrap_or_default())
    }

    async fn ensure_year_bucket(&self, year: &Year) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(year.clone())
            .or_insert_with(|| YearBucket::new(year.clone()));
        Ok(())
    }

    async fn bulk_insert(&self, year: &Year, records: Vec<Stored<E>>) -> Result<BulkWriteOutcome> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets
            .entry(year.clone())
            .or_insert_with(|| YearBucket::new(year.clone()));
        Ok(bucket.insert_many(records))
    }

    async fn bulk_update(
        &self,
        year: &Year,
        updates: Vec<RecordUpdate<E>>,
    ) -> Result<BulkWriteOutcome> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets
            .entry(year.clone())
            .or_insert_with(|| YearBucket::new(year.clone()));
        Ok(bucket.update_many(updates, Utc::now()))
    }

    async fn count_all(&self) -> Result<usize> {
        let buckets = self.buckets.read().await;
        Ok(buckets.values().map(|bucket| bucket.records.len()).sum())
    }

    async fn years(&self) -> Result<Vec<Year>> {
        let buckets = self.buckets.read().await;
        Ok(buckets.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use intern_model::{Company, Entity};

    use super::*;

    fn company(nom: &str, year: i32) -> Stored<Company> {
        let record = Company::new(nom, nom.to_lowercase(), Year::from_calendar(year));
        Stored::new(record, Utc::now())
    }

    #[tokio::test]
    async fn buckets_are_isolated_per_year() {
        let store = MemoryStore::<Company>::new();
        let y2022 = Year::from_calendar(2022);
        let y2023 = Year::from_calendar(2023);

        store.bulk_insert(&y2022, vec![company("Vermeg", 2022)]).await.unwrap();
        let outcome = store
            .bulk_insert(&y2023, vec![company("Vermeg", 2023), company("Sofrecom", 2023)])
            .await
            .unwrap();
        assert_eq!(outcome.succeeded, 2);

        assert_eq!(store.find_by_year(&y2022).await.unwrap().len(), 1);
        assert_eq!(store.count_all().await.unwrap(), 3);
        assert_eq!(store.years().await.unwrap(), vec![y2022, y2023]);
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ensure_bucket_creates_empty_year() {
        let store = MemoryStore::<Company>::new();
        let year = Year::from_calendar(2024);
        store.ensure_year_bucket(&year).await.unwrap();
        store.ensure_year_bucket(&year).await.unwrap();
        assert_eq!(store.years().await.unwrap(), vec![year.clone()]);
        assert!(store.find_by_year(&year).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_applies_company_increment() {
        let store = MemoryStore::<Company>::new();
        let year = Year::from_calendar(2023);
        store.bulk_insert(&year, vec![company("Vermeg", 2023)]).await.unwrap();

        let mut incoming = Company::new("Vermeg", "vermeg", year.clone());
        incoming.nombre_stagiaires = 2;
        incoming.encadrant_pro = vec!["Karim".to_string()];
        let update = RecordUpdate::new(incoming.natural_key(), incoming.update_patch().unwrap());
        let outcome = store.bulk_update(&year, vec![update]).await.unwrap();
        assert_eq!(outcome.succeeded, 1);

        let stored = store.find_by_year(&year).await.unwrap();
        assert_eq!(stored[0].record.nombre_stagiaires, 3);
        assert_eq!(stored[0].record.encadrant_pro, vec!["Karim".to_string()]);
        assert!(stored[0].updated_at >= stored[0].created_at);
    }
}
