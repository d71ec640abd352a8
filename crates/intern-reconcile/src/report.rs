use std::fmt;
use std::str::FromStr;

use intern_model::{EntityKind, Year};
use serde::{Deserialize, Serialize};

/// How incoming records are matched against the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Insert only; keys already stored are rejected by the store.
    Insert,
    /// Insert new keys, patch existing ones.
    #[default]
    Upsert,
}

impl ReconcileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Upsert => "upsert",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconcileMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "upsert" => Ok(Self::Upsert),
            other => Err(format!("unknown reconcile mode '{other}'")),
        }
    }
}

/// Store-side count taken after the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub count_documents: usize,
}

/// A failed chunk, failed records within a chunk, or a failed year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub year: Year,
    /// Chunk number within the year; `None` for a year-level failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<usize>,
    pub message: String,
    pub count: usize,
}

/// Outcome of reconciling one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub operation: ReconcileMode,
    #[serde(skip)]
    pub kind: EntityKind,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub total: usize,
    pub years_processed: usize,
    pub verification: Verification,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl ReconcileReport {
    pub(crate) fn new(operation: ReconcileMode, kind: EntityKind, total: usize) -> Self {
        Self {
            operation,
            kind,
            inserted: 0,
            updated: 0,
            failed: 0,
            total,
            years_processed: 0,
            verification: Verification::default(),
            errors: Vec::new(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Records that went through, inserted or updated.
    pub fn committed(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Bounded collector for [`ErrorDetail`]s.
#[derive(Debug)]
pub(crate) struct ErrorLog {
    limit: usize,
    entries: Vec<ErrorDetail>,
    omitted: usize,
}

impl ErrorLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: Vec::new(),
            omitted: 0,
        }
    }

    pub fn push(&mut self, detail: ErrorDetail) {
        if self.entries.len() < self.limit {
            self.entries.push(detail);
        } else {
            self.omitted += 1;
        }
    }

    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn into_entries(self) -> Vec<ErrorDetail> {
        self.entries
    }
}
