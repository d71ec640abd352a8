//! Workbook readers, one per source format.

mod csv;
mod json;
mod spreadsheet;

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::workbook::Workbook;

pub use self::csv::read_csv_sheet;
pub use self::json::read_json_workbook;
pub use self::spreadsheet::read_spreadsheet;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads a workbook, choosing the reader from the file extension.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let workbook = match extension.as_str() {
        "csv" => Workbook::new(vec![read_csv_sheet(path)?]),
        "json" => read_json_workbook(path)?,
        ext if SPREADSHEET_EXTENSIONS.contains(&ext) => read_spreadsheet(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                extension,
                path: path.to_path_buf(),
            });
        }
    };
    debug!(
        path = %path.display(),
        sheet_count = workbook.sheets.len(),
        "workbook loaded"
    );
    Ok(workbook)
}
