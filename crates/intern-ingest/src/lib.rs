//! Spreadsheet ingestion for the internship import pipeline.
//!
//! This crate turns human-authored exports into a uniform [`Workbook`] of
//! typed [`Cell`]s and provides the value-level cleaning rules applied by
//! the row parsers.
//!
//! # Features
//!
//! - **Workbook sources**: `.xlsx`/`.xls`/`.ods` via calamine, `.csv` as a
//!   single sheet, and JSON sheet-map payloads
//! - **Value cleaning**: string/number/score coercion and spreadsheet date decoding
//! - **Company names**: accent- and punctuation-insensitive matching keys
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use intern_ingest::{read_workbook, clean_string};
//!
//! let workbook = read_workbook(Path::new("promo-2023.xlsx"))?;
//! for sheet in &workbook.sheets {
//!     println!("{}: {} rows", sheet.name, sheet.rows.len());
//! }
//! ```

mod cell;
mod clean;
mod error;
mod normalize;
mod source;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Cells and Workbooks ===
pub use cell::Cell;
pub use workbook::{Sheet, SheetMap, Workbook, WorkbookPayload};

// === Sources ===
pub use source::{read_csv_sheet, read_json_workbook, read_spreadsheet, read_workbook};

// === Cleaning ===
pub use clean::{
    CellDate, EXCEL_EPOCH_OFFSET_DAYS, clean_identifier, clean_number, clean_score, clean_string, normalize_row,
    normalize_value, parse_date,
};
pub use normalize::{company_key, normalize_company_name};
