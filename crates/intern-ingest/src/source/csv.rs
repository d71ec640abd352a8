use std::path::Path;

use csv::ReaderBuilder;

use crate::cell::Cell;
use crate::clean::normalize_row;
use crate::error::{IngestError, Result};
use crate::workbook::Sheet;

fn normalize_cell(raw: &str) -> Cell {
    Cell::text(raw.trim().trim_matches('\u{feff}'))
}

/// Reads a CSV export as a single sheet named after the file stem.
///
/// CSV has no cell types, so every value goes through the general value
/// normalizer to recover numbers and booleans.
pub fn read_csv_sheet(path: &Path) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<Cell> = record.iter().map(normalize_cell).collect();
        rows.push(normalize_row(row));
    }
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("sheet")
        .to_string();
    Ok(Sheet::new(name, rows))
}
