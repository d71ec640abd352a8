//! Store error types.

use std::path::PathBuf;

use intern_model::ModelError;
use thiserror::Error;

/// Failure of a whole store call.
///
/// Rejections of individual records are not errors; they are reported in a
/// [`BulkWriteOutcome`](crate::BulkWriteOutcome).
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A year document could not be encoded.
    #[error("failed to serialize year bucket")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// A year document on disk is not valid.
    #[error("corrupt year bucket {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A blocking file task panicked or was cancelled.
    #[error("background file task failed")]
    Background {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StoreError {
    /// A one-line explanation suitable for terminal output.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} {}", operation, path.display()),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Serialization { .. } => "An error occurred while saving records.".to_string(),
            Self::Deserialization { path, .. } => format!(
                "The store file {} is not valid JSON and may be corrupted.",
                path.display()
            ),
            Self::Background { .. } => "A background save task was interrupted.".to_string(),
            Self::Model(error) => error.to_string(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
