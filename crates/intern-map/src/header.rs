//! Header alias resolution.

use std::collections::HashMap;
use std::hash::Hash;

use intern_ingest::{Cell, clean_string};

/// A closed set of canonical fields, each with its header aliases.
pub trait FieldSet: Copy + Eq + Hash + 'static {
    const ALL: &'static [Self];

    /// Lower-case fragments any of which identifies the column.
    fn aliases(self) -> &'static [&'static str];
}

/// Lower-cased, trimmed text of every header cell.
pub fn header_labels(header: &[Cell]) -> Vec<String> {
    header
        .iter()
        .map(|cell| clean_string(Some(cell)).to_lowercase())
        .collect()
}

/// Index of the first header containing any alias as a substring.
///
/// Matching is permissive on purpose: "Téléphone encadrant" matches the
/// alias "téléphone". A header that merely contains an alias also matches.
pub fn resolve_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| aliases.iter().any(|alias| header.contains(alias)))
}

/// Resolved column positions for one sheet.
#[derive(Debug, Clone)]
pub struct ColumnIndex<F> {
    columns: HashMap<F, usize>,
}

impl<F: FieldSet> ColumnIndex<F> {
    /// Resolves every field of `F` against the sheet's header row.
    pub fn resolve(header: &[Cell]) -> Self {
        let labels = header_labels(header);
        let columns = F::ALL
            .iter()
            .filter_map(|field| resolve_column(&labels, field.aliases()).map(|idx| (*field, idx)))
            .collect();
        Self { columns }
    }

    pub fn get(&self, field: F) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn has(&self, field: F) -> bool {
        self.columns.contains_key(&field)
    }

    /// The cell for `field` in `row`; `None` when unmapped or past the row end.
    pub fn cell<'a>(&self, row: &'a [Cell], field: F) -> Option<&'a Cell> {
        self.get(field).and_then(|idx| row.get(idx))
    }

    /// Cleaned text for `field`, `None` when blank.
    pub fn text(&self, row: &[Cell], field: F) -> Option<String> {
        let value = clean_string(self.cell(row, field));
        (!value.is_empty()).then_some(value)
    }

    pub fn mapped_len(&self) -> usize {
        self.columns.len()
    }
}
