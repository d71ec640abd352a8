//! Workbook-level orchestration across sheets.

use std::collections::BTreeSet;

use intern_ingest::Workbook;
use intern_model::{Company, Student, Supervisor, Year};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::company::parse_companies;
use crate::student::parse_students;
use crate::supervisor::parse_supervisors;
use crate::year::extract_year;

/// Options for [`parse_workbook_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Year for sheets whose name carries none; the current year when unset.
    pub fallback_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub total_students: usize,
    pub total_companies: usize,
    pub total_supervisors: usize,
    /// Distinct sheet years, most recent first.
    pub years_covered: Vec<Year>,
}

/// Every record extracted from a workbook plus a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub students: Vec<Student>,
    pub companies: Vec<Company>,
    pub supervisors: Vec<Supervisor>,
    pub summary: ParseSummary,
}

/// Parses every non-empty sheet with the default options.
pub fn parse_workbook(workbook: &Workbook) -> ParseResult {
    parse_workbook_with(workbook, ParseOptions::default())
}

/// Parses every non-empty sheet, tagging records with the sheet's year.
///
/// Sheets are independent: a sheet with unusable headers contributes nothing
/// and does not affect the others.
pub fn parse_workbook_with(workbook: &Workbook, options: ParseOptions) -> ParseResult {
    let mut result = ParseResult::default();
    let mut years = BTreeSet::new();

    for sheet in &workbook.sheets {
        if sheet.is_empty() {
            continue;
        }
        let annee = extract_year(&sheet.name, options.fallback_year);
        let span = info_span!("sheet", name = %sheet.name, year = %annee);
        let _guard = span.enter();

        let students = parse_students(sheet, &annee);
        let companies = parse_companies(sheet, &annee);
        let supervisors = parse_supervisors(sheet, &annee);
        debug!(
            rows = sheet.data_len(),
            students = students.len(),
            companies = companies.len(),
            supervisors = supervisors.len(),
            "sheet parsed"
        );

        years.insert(annee);
        result.students.extend(students);
        result.companies.extend(companies);
        result.supervisors.extend(supervisors);
    }

    result.summary = ParseSummary {
        total_students: result.students.len(),
        total_companies: result.companies.len(),
        total_supervisors: result.supervisors.len(),
        years_covered: years.into_iter().rev().collect(),
    };
    info!(
        sheets = workbook.sheets.len(),
        students = result.summary.total_students,
        companies = result.summary.total_companies,
        supervisors = result.summary.total_supervisors,
        "workbook parsed"
    );
    result
}
