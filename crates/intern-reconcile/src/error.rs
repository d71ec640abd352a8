//! Reconciliation error types.

use intern_model::EntityKind;
use intern_store::StoreError;
use thiserror::Error;

/// Failures that abort a whole reconciliation call.
///
/// Chunk- and year-level store failures are not errors; they are counted in
/// the [`ReconcileReport`](crate::ReconcileReport).
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    /// The post-run count of persisted records could not be taken.
    #[error("failed to verify {kind} record count")]
    Verification {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },

    /// Loading records for the link phase failed.
    #[error("failed to load {kind} for linking")]
    Link {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },
}

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
