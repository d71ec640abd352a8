//! Spreadsheet-to-record mapping for the internship import pipeline.
//!
//! Column positions are found by matching header cells against alias tables
//! ([`aliases`]), rows are turned into candidate records by the per-entity
//! parsers, and [`parse_workbook`] drives all of them across every sheet of
//! a workbook, tagging each sheet with the academic year found in its name.

pub mod aliases;
mod company;
mod header;
mod student;
mod supervisor;
mod workbook;
mod year;

pub use aliases::{CompanyField, StudentField, SupervisorField};
pub use company::parse_companies;
pub use header::{ColumnIndex, FieldSet, header_labels, resolve_column};
pub use student::parse_students;
pub use supervisor::parse_supervisors;
pub use workbook::{ParseOptions, ParseResult, ParseSummary, parse_workbook, parse_workbook_with};
pub use year::{extract_year, year_in_name};
