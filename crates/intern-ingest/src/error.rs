//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a workbook.
///
/// Row- and cell-level problems are never errors; they are handled by
/// skipping the offending row. Only failures to open or decode a source
/// surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Workbook file not found.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported workbook format.
    #[error("unsupported workbook format '{extension}' for {path}")]
    UnsupportedFormat { extension: String, path: PathBuf },

    /// Spreadsheet container could not be decoded.
    #[error("failed to open spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// CSV decoding failed.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON payload is not a valid sheet map.
    #[error("invalid workbook payload {path}: {source}")]
    Payload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            extension: "pdf".to_string(),
            path: PathBuf::from("/tmp/report.pdf"),
        };
        assert_eq!(
            err.to_string(),
            "unsupported workbook format 'pdf' for /tmp/report.pdf"
        );
    }
}
