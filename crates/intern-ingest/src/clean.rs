//! Cell value cleaning and coercion.
//!
//! Every function here is total: malformed input degrades to an empty string,
//! zero, `None` or [`CellDate::Invalid`] rather than an error, so a single bad
//! cell never aborts a row.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::cell::Cell;

/// Days between the spreadsheet serial epoch (1899-12-30) and 1970-01-01.
pub const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25569.0;

const MILLIS_PER_DAY: f64 = 86_400.0 * 1000.0;

/// Accepted textual date layouts, day-first before month-first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M"];

/// Returns the trimmed text form of a cell, or `""` when absent.
pub fn clean_string(cell: Option<&Cell>) -> String {
    match cell {
        None => String::new(),
        Some(cell) => cell.to_string().trim().to_string(),
    }
}

/// Coerces a cell to a number, keeping only digits, `.` and `-`.
///
/// Absent cells and text without a usable numeric prefix yield `0`, so callers
/// cannot tell an unreadable value from a real zero. Use [`clean_score`] where
/// that distinction matters.
pub fn clean_number(cell: Option<&Cell>) -> f64 {
    match cell {
        None | Some(Cell::Empty | Cell::Bool(_)) => 0.0,
        Some(Cell::Number(value)) if value.is_nan() => 0.0,
        Some(Cell::Number(value)) => *value,
        Some(Cell::Text(text)) => {
            let kept: String = text
                .chars()
                .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
                .collect();
            parse_float_prefix(&kept).unwrap_or(0.0)
        }
    }
}

/// Coerces a cell to a positive whole identifier such as a CIN.
///
/// Fractional, negative and out-of-range values yield `0`, the same as an
/// unreadable cell, rather than being truncated or saturated.
pub fn clean_identifier(cell: Option<&Cell>) -> i64 {
    let value = clean_number(cell);
    // i64::MAX rounds up to 2^63 as f64, so the bound is exclusive.
    if value.is_finite() && value > 0.0 && value.fract() == 0.0 && value < i64::MAX as f64 {
        value as i64
    } else {
        0
    }
}

/// Like [`clean_number`] but returns `None` for blank cells and text with no digit.
pub fn clean_score(cell: Option<&Cell>) -> Option<f64> {
    match cell? {
        Cell::Empty | Cell::Bool(_) => None,
        Cell::Number(value) => value.is_finite().then_some(*value),
        Cell::Text(text) if !text.chars().any(|ch| ch.is_ascii_digit()) => None,
        text @ Cell::Text(_) => Some(clean_number(Some(text))),
    }
}

/// Longest leading decimal literal: optional `-`, digits, optional fraction.
fn parse_float_prefix(value: &str) -> Option<f64> {
    let bytes = value.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }
    value.get(..end)?.parse::<f64>().ok()
}

/// Outcome of decoding a date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDate {
    /// Nothing was supplied.
    Absent,
    /// Something was supplied but it is not a calendar date.
    Invalid,
    Valid(NaiveDate),
}

impl CellDate {
    pub fn valid(self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(date),
            Self::Absent | Self::Invalid => None,
        }
    }
}

/// Decodes a spreadsheet serial number or a textual date.
pub fn parse_date(cell: Option<&Cell>) -> CellDate {
    match cell {
        None | Some(Cell::Empty | Cell::Bool(false)) => CellDate::Absent,
        Some(Cell::Number(serial)) if *serial == 0.0 => CellDate::Absent,
        Some(Cell::Number(serial)) => from_serial(*serial),
        Some(Cell::Text(text)) if text.trim().is_empty() => CellDate::Absent,
        Some(Cell::Text(text)) => from_text(text.trim()),
        Some(Cell::Bool(true)) => CellDate::Invalid,
    }
}

fn from_serial(serial: f64) -> CellDate {
    let millis = (serial - EXCEL_EPOCH_OFFSET_DAYS) * MILLIS_PER_DAY;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return CellDate::Invalid;
    }
    match DateTime::from_timestamp_millis(millis.round() as i64) {
        Some(timestamp) => CellDate::Valid(timestamp.date_naive()),
        None => CellDate::Invalid,
    }
}

fn from_text(text: &str) -> CellDate {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return CellDate::Valid(timestamp.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return CellDate::Valid(timestamp.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map_or(CellDate::Invalid, CellDate::Valid)
}

/// General-purpose normalization used when cells arrive as untyped text.
///
/// Collapses whitespace, and re-types decimal-looking text (`.` or `,`
/// separator) as numbers and `true`/`false` as booleans.
pub fn normalize_value(cell: Cell) -> Cell {
    let Cell::Text(text) = cell else {
        return cell;
    };
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Cell::Empty;
    }
    if looks_decimal(&collapsed)
        && let Ok(value) = collapsed.replace(',', ".").parse::<f64>()
    {
        return Cell::Number(value);
    }
    if collapsed.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if collapsed.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }
    Cell::Text(collapsed)
}

pub fn normalize_row(row: Vec<Cell>) -> Vec<Cell> {
    row.into_iter().map(normalize_value).collect()
}

/// Matches `-?\d+([.,]\d+)?`.
fn looks_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::text(value)
    }

    #[test]
    fn clean_string_trims_and_defaults() {
        assert_eq!(clean_string(None), "");
        assert_eq!(clean_string(Some(&text("  Sami  "))), "Sami");
        assert_eq!(clean_string(Some(&Cell::Number(12.0))), "12");
    }

    #[test]
    fn clean_number_strips_noise() {
        assert_eq!(clean_number(Some(&text("12kg"))), 12.0);
        assert_eq!(clean_number(Some(&text("abc"))), 0.0);
        assert_eq!(clean_number(Some(&text("note: 15.5/20"))), 15.52);
        assert_eq!(clean_number(Some(&text("-3.5"))), -3.5);
        assert_eq!(clean_number(None), 0.0);
        assert_eq!(clean_number(Some(&Cell::Number(7.0))), 7.0);
    }

    #[test]
    fn clean_number_keeps_leading_literal_only() {
        assert_eq!(clean_number(Some(&text("1.2.3"))), 1.2);
        assert_eq!(clean_number(Some(&text("--5"))), 0.0);
        assert_eq!(clean_number(Some(&text(".5"))), 0.5);
    }

    #[test]
    fn clean_identifier_rejects_what_it_cannot_hold_exactly() {
        assert_eq!(clean_identifier(Some(&Cell::Number(11_223_344.0))), 11_223_344);
        assert_eq!(clean_identifier(Some(&text("CIN 01234567"))), 1_234_567);
        assert_eq!(clean_identifier(Some(&Cell::Number(1234.5))), 0);
        assert_eq!(clean_identifier(Some(&text("1234.5"))), 0);
        assert_eq!(clean_identifier(Some(&Cell::Number(-42.0))), 0);
        assert_eq!(clean_identifier(Some(&Cell::Number(1e19))), 0);
        assert_eq!(clean_identifier(Some(&Cell::Number(f64::INFINITY))), 0);
        assert_eq!(clean_identifier(None), 0);
    }

    #[test]
    fn clean_score_distinguishes_unknown_from_zero() {
        assert_eq!(clean_score(Some(&text("abs"))), None);
        assert_eq!(clean_score(Some(&Cell::Empty)), None);
        assert_eq!(clean_score(None), None);
        assert_eq!(clean_score(Some(&text("0"))), Some(0.0));
        assert_eq!(clean_score(Some(&text("16 pts"))), Some(16.0));
        assert_eq!(clean_score(Some(&Cell::Number(16.25))), Some(16.25));
    }

    #[test]
    fn parse_date_decodes_serials() {
        // 44927 is 2023-01-01 in the 1900 date system.
        let date = parse_date(Some(&Cell::Number(44927.0)));
        assert_eq!(date, CellDate::Valid(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()));
        assert_eq!(
            parse_date(Some(&Cell::Number(25569.0))),
            CellDate::Valid(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
        );
    }

    #[test]
    fn parse_date_reads_french_and_iso_text() {
        let expected = CellDate::Valid(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(parse_date(Some(&text("15/03/2023"))), expected);
        assert_eq!(parse_date(Some(&text("2023-03-15"))), expected);
        assert_eq!(parse_date(Some(&text("2023-03-15T08:30:00Z"))), expected);
    }

    #[test]
    fn parse_date_absent_and_invalid() {
        assert_eq!(parse_date(None), CellDate::Absent);
        assert_eq!(parse_date(Some(&text("  "))), CellDate::Absent);
        assert_eq!(parse_date(Some(&Cell::Number(0.0))), CellDate::Absent);
        assert_eq!(parse_date(Some(&text("bientôt"))), CellDate::Invalid);
        assert_eq!(parse_date(Some(&Cell::Number(f64::MAX))), CellDate::Invalid);
    }

    #[test]
    fn normalize_value_retypes_text() {
        assert_eq!(normalize_value(text("  12,5 ")), Cell::Number(12.5));
        assert_eq!(normalize_value(text("-4")), Cell::Number(-4.0));
        assert_eq!(normalize_value(text("TRUE")), Cell::Bool(true));
        assert_eq!(normalize_value(text("a   b\tc")), text("a b c"));
        assert_eq!(normalize_value(text("   ")), Cell::Empty);
        assert_eq!(normalize_value(text("12.5.1")), text("12.5.1"));
        assert_eq!(normalize_value(Cell::Number(3.0)), Cell::Number(3.0));
    }
}
