//! Persistence boundary for the internship import pipeline.
//!
//! Records are kept in per-year buckets, one set of buckets per entity type.
//! The [`EntityStore`] trait exposes the few capabilities the reconciliation
//! engine needs; [`MemoryStore`] and [`JsonFileStore`] implement it, and
//! [`Database`] bundles one store per entity type.
//!
//! # Features
//!
//! - **Natural-key uniqueness** per year bucket, reported per record
//! - **Partial success**: bulk writes accept what they can
//! - **Atomic writes** for the JSON file store (temp file + rename)
//!
//! # Layout
//!
//! ```text
//! {root}/students/2023.json
//! {root}/companies/2023.json
//! {root}/supervisors/2023.json
//! ```

mod bucket;
mod database;
mod error;
mod io;
mod json_file;
mod memory;
mod outcome;
mod store;

pub use database::Database;
pub use error::{Result, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use outcome::{BulkWriteOutcome, RecordFailure, RecordUpdate};
pub use store::EntityStore;
