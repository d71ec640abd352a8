use intern_model::{Entity, Patch};
use serde::Serialize;

/// Result of a bulk write where the store accepts what it can.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkWriteOutcome {
    pub succeeded: usize,
    pub failures: Vec<RecordFailure>,
}

impl BulkWriteOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub(crate) fn reject(&mut self, index: usize, key: impl ToString, reason: impl Into<String>) {
        self.failures.push(RecordFailure {
            index,
            key: key.to_string(),
            reason: reason.into(),
        });
    }
}

/// One record the store refused, by position in the submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub index: usize,
    pub key: String,
    pub reason: String,
}

/// A field-level update addressed by natural key.
#[derive(Debug, Clone)]
pub struct RecordUpdate<E: Entity> {
    pub key: E::Key,
    pub patch: Patch,
}

impl<E: Entity> RecordUpdate<E> {
    pub fn new(key: E::Key, patch: Patch) -> Self {
        Self { key, patch }
    }
}
