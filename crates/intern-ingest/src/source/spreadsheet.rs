use std::path::Path;

use calamine::{Reader, open_workbook_auto};

use crate::cell::Cell;
use crate::error::{IngestError, Result};
use crate::workbook::{Sheet, Workbook};

/// Reads every sheet of an `.xlsx`/`.xls`/`.ods` file.
///
/// A sheet whose range cannot be decoded is kept as an empty sheet so the
/// remaining sheets still load.
pub fn read_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut workbook = open_workbook_auto(path).map_err(|error| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let rows = match workbook.worksheet_range(&name) {
            Ok(range) => range
                .rows()
                .map(|row| row.iter().map(Cell::from).collect())
                .collect(),
            Err(error) => {
                tracing::warn!(sheet = %name, %error, "skipping unreadable sheet");
                Vec::new()
            }
        };
        sheets.push(Sheet::new(name, rows));
    }
    Ok(Workbook::new(sheets))
}
