//! Year bucket shared by the store implementations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use intern_model::{Entity, Stored, Year};
use serde::{Deserialize, Serialize};

use crate::outcome::{BulkWriteOutcome, RecordUpdate};

pub(crate) const DUPLICATE_KEY: &str = "duplicate natural key in year bucket";
pub(crate) const UNKNOWN_KEY: &str = "no record matches natural key";

/// All records of one entity type for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Entity"))]
pub(crate) struct YearBucket<E> {
    pub annee: Year,
    pub records: Vec<Stored<E>>,
}

impl<E: Entity> YearBucket<E> {
    pub fn new(annee: Year) -> Self {
        Self {
            annee,
            records: Vec::new(),
        }
    }

    fn key_positions(&self) -> HashMap<E::Key, usize> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, stored)| (stored.natural_key(), idx))
            .collect()
    }

    /// Appends records whose key is not taken yet; the rest are rejected.
    pub fn insert_many(&mut self, records: Vec<Stored<E>>) -> BulkWriteOutcome {
        let mut positions = self.key_positions();
        let mut outcome = BulkWriteOutcome::default();
        for (index, stored) in records.into_iter().enumerate() {
            let key = stored.natural_key();
            if positions.contains_key(&key) {
                outcome.reject(index, &key, DUPLICATE_KEY);
                continue;
            }
            positions.insert(key, self.records.len());
            self.records.push(stored);
            outcome.succeeded += 1;
        }
        outcome
    }

    /// Applies each patch to the record with the matching key.
    pub fn update_many(
        &mut self,
        updates: Vec<RecordUpdate<E>>,
        now: DateTime<Utc>,
    ) -> BulkWriteOutcome {
        let positions = self.key_positions();
        let mut outcome = BulkWriteOutcome::default();
        for (index, update) in updates.into_iter().enumerate() {
            let Some(&position) = positions.get(&update.key) else {
                outcome.reject(index, &update.key, UNKNOWN_KEY);
                continue;
            };
            match self.records[position].apply(&update.patch, now) {
                Ok(()) => outcome.succeeded += 1,
                Err(error) => outcome.reject(index, &update.key, error.to_string()),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use intern_model::{Categorie, Patch, Supervisor};
    use serde_json::json;

    use super::*;

    fn stored(prenom: &str, categorie: Categorie) -> Stored<Supervisor> {
        Stored::new(
            Supervisor::new(prenom, categorie, Year::from_calendar(2023)),
            Utc::now(),
        )
    }

    #[test]
    fn same_name_in_both_categories_does_not_collide() {
        let mut bucket = YearBucket::new(Year::from_calendar(2023));
        let outcome = bucket.insert_many(vec![
            stored("Amira", Categorie::Academique),
            stored("Amira", Categorie::Professionnel),
            stored("Amira", Categorie::Academique),
        ]);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 2);
        assert_eq!(outcome.failures[0].reason, DUPLICATE_KEY);
    }

    #[test]
    fn update_of_unknown_key_is_rejected() {
        let mut bucket = YearBucket::new(Year::from_calendar(2023));
        bucket.insert_many(vec![stored("Amira", Categorie::Academique)]);

        let mut patch = Patch::new();
        patch.set("email", json!("amira@isimm.tn"));
        let known = Supervisor::new("Amira", Categorie::Academique, Year::from_calendar(2023));
        let unknown = Supervisor::new("Omar", Categorie::Academique, Year::from_calendar(2023));
        let outcome = bucket.update_many(
            vec![
                RecordUpdate::new(known.natural_key(), patch.clone()),
                RecordUpdate::new(unknown.natural_key(), patch),
            ],
            Utc::now(),
        );
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failures[0].reason, UNKNOWN_KEY);
        assert_eq!(
            bucket.records[0].record.email.as_deref(),
            Some("amira@isimm.tn")
        );
    }
}
