//! Reconciliation of parsed records with the persisted year buckets.
//!
//! [`Reconciler`] decides per natural key whether an incoming record is an
//! insert or an update, writes in fixed-size chunks, and folds chunk and year
//! failures into a [`ReconcileReport`] instead of aborting. [`link_students`]
//! then resolves the name references students carry into record ids, and
//! [`import_parsed`] runs the whole sequence for a parsed workbook.

mod engine;
mod error;
mod link;
mod pipeline;
mod report;

pub use engine::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ERROR_DETAILS, ReconcileOptions, Reconciler};
pub use error::{ReconcileError, Result};
pub use link::{LinkReport, StudentLinks, link_students};
pub use pipeline::{ImportReport, import_parsed};
pub use report::{ErrorDetail, ReconcileMode, ReconcileReport, Verification};
