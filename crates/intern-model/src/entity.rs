//! The [`Entity`] trait shared by every persisted record type.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::RecordId;
use crate::patch::Patch;
use crate::year::Year;

/// The three record families handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Company,
    Supervisor,
}

impl EntityKind {
    /// Collection name, also used as the store directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Company => "companies",
            Self::Supervisor => "supervisors",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that lives in a per-year bucket and is identified by a natural key.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Serialized field names making up the natural key (plus the year).
    ///
    /// These fields are never part of an update payload.
    const KEY_FIELDS: &'static [&'static str];

    type Key: Clone + fmt::Debug + fmt::Display + Eq + Ord + Hash + Send + Sync;

    fn year(&self) -> &Year;

    fn natural_key(&self) -> Self::Key;

    /// Field-level update applied when this record's key already exists.
    ///
    /// The default sets every non-null, non-key field (last write wins).
    fn update_patch(&self) -> Result<Patch> {
        Patch::from_record(self, Self::KEY_FIELDS)
    }
}

/// A persisted record together with its store identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<E> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<E: Entity> Stored<E> {
    /// Wraps a freshly parsed record for insertion, stamping both timestamps.
    pub fn new(record: E, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            record,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn natural_key(&self) -> E::Key {
        self.record.natural_key()
    }

    /// Applies a field-level patch in place and stamps the update time.
    pub fn apply(&mut self, patch: &Patch, now: DateTime<Utc>) -> Result<()> {
        self.record = patch.apply_to(&self.record)?;
        self.updated_at = now;
        Ok(())
    }
}
