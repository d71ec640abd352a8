//! Year-by-year, chunk-by-chunk reconciliation against an entity store.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use intern_model::{Entity, Stored, Year};
use intern_store::{BulkWriteOutcome, EntityStore, RecordUpdate};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::{ReconcileError, Result};
use crate::report::{ErrorDetail, ErrorLog, ReconcileMode, ReconcileReport};

pub const DEFAULT_CHUNK_SIZE: usize = 100;
pub const DEFAULT_MAX_ERROR_DETAILS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub mode: ReconcileMode,
    pub chunk_size: usize,
    pub max_error_details: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            mode: ReconcileMode::Upsert,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_error_details: DEFAULT_MAX_ERROR_DETAILS,
        }
    }
}

/// Records of one year split into the two write paths.
struct YearPlan<E: Entity> {
    inserts: Vec<E>,
    updates: Vec<E>,
    /// In-batch duplicates refused in insert mode.
    duplicates: Vec<E::Key>,
}

/// Running totals for one call.
struct Tally {
    inserted: usize,
    updated: usize,
    failed: usize,
    errors: ErrorLog,
}

impl Tally {
    fn fail(&mut self, year: &Year, batch: Option<usize>, message: String, count: usize) {
        self.failed += count;
        self.errors.push(ErrorDetail {
            year: year.clone(),
            batch,
            message,
            count,
        });
    }

    fn absorb(&mut self, year: &Year, batch: usize, phase: &str, outcome: &BulkWriteOutcome) -> usize {
        if let Some(first) = outcome.failures.first() {
            let message = format!(
                "{phase}: {} record(s) rejected, first {}: {}",
                outcome.failed(),
                first.key,
                first.reason
            );
            self.fail(year, Some(batch), message, outcome.failed());
        }
        outcome.succeeded
    }
}

/// Merges freshly parsed records of one entity type into a store.
///
/// Years and chunks are processed one after another: the existing-key
/// snapshot taken for a year is only valid while nothing else writes to
/// that bucket.
pub struct Reconciler<'a, E: Entity> {
    store: &'a dyn EntityStore<E>,
    options: ReconcileOptions,
}

impl<'a, E: Entity> Reconciler<'a, E> {
    pub fn new(store: &'a dyn EntityStore<E>, options: ReconcileOptions) -> Result<Self> {
        if options.chunk_size == 0 {
            return Err(ReconcileError::InvalidChunkSize);
        }
        Ok(Self { store, options })
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconciles `records` and reports per-record totals.
    ///
    /// Only the final verification count can fail the call; every other
    /// store failure is counted against the records it affected.
    pub async fn reconcile(&self, records: Vec<E>) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::new(self.options.mode, E::KIND, records.len());
        let mut tally = Tally {
            inserted: 0,
            updated: 0,
            failed: 0,
            errors: ErrorLog::new(self.options.max_error_details),
        };

        let by_year = partition_by_year(records);
        report.years_processed = by_year.len();
        for (year, records) in by_year {
            let span = info_span!("reconcile", kind = %E::KIND, year = %year);
            self.reconcile_year(&year, records, &mut tally)
                .instrument(span)
                .await;
        }

        let count_documents = self
            .store
            .count_all()
            .await
            .map_err(|source| ReconcileError::Verification {
                kind: E::KIND,
                source,
            })?;

        if tally.errors.omitted() > 0 {
            debug!(omitted = tally.errors.omitted(), "error details truncated");
        }
        report.inserted = tally.inserted;
        report.updated = tally.updated;
        report.failed = tally.failed;
        report.verification.count_documents = count_documents;
        report.errors = tally.errors.into_entries();
        info!(
            kind = %E::KIND,
            mode = %self.options.mode,
            inserted = report.inserted,
            updated = report.updated,
            failed = report.failed,
            total = report.total,
            stored = count_documents,
            "reconciliation finished"
        );
        Ok(report)
    }

    async fn reconcile_year(&self, year: &Year, records: Vec<E>, tally: &mut Tally) {
        let submitted = records.len();
        let plan = match self.plan_year(year, records).await {
            Ok(plan) => plan,
            Err(error) => {
                warn!(%error, records = submitted, "year bucket unavailable");
                tally.fail(year, None, error.to_string(), submitted);
                return;
            }
        };

        if !plan.duplicates.is_empty() {
            let message = format!(
                "duplicate key in batch: {}",
                plan.duplicates
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            tally.fail(year, None, message, plan.duplicates.len());
        }

        let (inserted_before, updated_before, failed_before) =
            (tally.inserted, tally.updated, tally.failed);
        let insert_chunks = plan.inserts.len().div_ceil(self.options.chunk_size);
        self.insert_chunks(year, plan.inserts, tally).await;
        self.update_chunks(year, plan.updates, insert_chunks, tally).await;
        info!(
            inserted = tally.inserted - inserted_before,
            updated = tally.updated - updated_before,
            failed = tally.failed - failed_before,
            "year reconciled"
        );
    }

    /// Ensures the bucket exists and sorts records into inserts and updates.
    ///
    /// In upsert mode a key already stored, or already queued for insert by
    /// this batch, becomes an update applied after the inserts.
    async fn plan_year(&self, year: &Year, records: Vec<E>) -> intern_store::Result<YearPlan<E>> {
        self.store.ensure_year_bucket(year).await?;
        let mut known: HashSet<E::Key> = match self.options.mode {
            ReconcileMode::Upsert => self
                .store
                .find_by_year(year)
                .await?
                .iter()
                .map(Stored::natural_key)
                .collect(),
            ReconcileMode::Insert => HashSet::new(),
        };
        debug!(existing = known.len(), incoming = records.len(), "keys loaded");

        let mut plan = YearPlan {
            inserts: Vec::new(),
            updates: Vec::new(),
            duplicates: Vec::new(),
        };
        for record in records {
            let key = record.natural_key();
            if known.insert(key.clone()) {
                plan.inserts.push(record);
            } else {
                match self.options.mode {
                    ReconcileMode::Upsert => plan.updates.push(record),
                    ReconcileMode::Insert => plan.duplicates.push(key),
                }
            }
        }
        Ok(plan)
    }

    async fn insert_chunks(&self, year: &Year, records: Vec<E>, tally: &mut Tally) {
        for (batch, chunk) in into_chunks(records, self.options.chunk_size)
            .into_iter()
            .enumerate()
        {
            let size = chunk.len();
            let now = Utc::now();
            let stored = chunk.into_iter().map(|record| Stored::new(record, now)).collect();
            match self.store.bulk_insert(year, stored).await {
                Ok(outcome) => {
                    let inserted = tally.absorb(year, batch, "insert", &outcome);
                    tally.inserted += inserted;
                    debug!(batch, size, inserted = outcome.succeeded, "insert chunk done");
                }
                Err(error) => {
                    warn!(batch, size, %error, "insert chunk failed");
                    tally.fail(year, Some(batch), format!("insert: {error}"), size);
                }
            }
        }
    }

    async fn update_chunks(&self, year: &Year, records: Vec<E>, first_batch: usize, tally: &mut Tally) {
        for (offset, chunk) in into_chunks(records, self.options.chunk_size)
            .into_iter()
            .enumerate()
        {
            let batch = first_batch + offset;
            let size = chunk.len();
            let mut updates = Vec::with_capacity(size);
            for record in chunk {
                match record.update_patch() {
                    Ok(patch) => updates.push(RecordUpdate::new(record.natural_key(), patch)),
                    Err(error) => tally.fail(
                        year,
                        Some(batch),
                        format!("update patch for {}: {error}", record.natural_key()),
                        1,
                    ),
                }
            }
            if updates.is_empty() {
                continue;
            }
            let pending = updates.len();
            match self.store.bulk_update(year, updates).await {
                Ok(outcome) => {
                    let updated = tally.absorb(year, batch, "update", &outcome);
                    tally.updated += updated;
                    debug!(batch, size, updated = outcome.succeeded, "update chunk done");
                }
                Err(error) => {
                    warn!(batch, size, %error, "update chunk failed");
                    tally.fail(year, Some(batch), format!("update: {error}"), pending);
                }
            }
        }
    }
}

fn partition_by_year<E: Entity>(records: Vec<E>) -> BTreeMap<Year, Vec<E>> {
    let mut by_year: BTreeMap<Year, Vec<E>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year().clone()).or_default().push(record);
    }
    by_year
}

fn into_chunks<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        chunks.push(items.by_ref().take(size).collect());
    }
    chunks
}
