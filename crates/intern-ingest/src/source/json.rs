use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::workbook::{Workbook, WorkbookPayload};

/// Reads a JSON sheet-map payload (`{"sheets": {"name": [[...], ...]}}`).
pub fn read_json_workbook(path: &Path) -> Result<Workbook> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: WorkbookPayload =
        serde_json::from_str(&content).map_err(|source| IngestError::Payload {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Workbook::from(payload))
}
