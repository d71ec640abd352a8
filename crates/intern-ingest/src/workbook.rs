//! In-memory workbook representation shared by every source format.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::cell::Cell;

/// One tab of a workbook: row 0 holds the headers, data rows follow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Creates a sheet, dropping trailing rows whose cells are all blank.
    pub fn new(name: impl Into<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        while rows
            .last()
            .is_some_and(|row| row.iter().all(Cell::is_blank))
        {
            rows.pop();
        }
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    /// Number of data rows (header excluded).
    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.iter().all(Sheet::is_empty)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// Loosely-typed sheet map as posted by upload clients.
///
/// A payload without `sheets` is accepted and yields an empty workbook.
/// Sheets keep the order in which they appear in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkbookPayload {
    #[serde(default)]
    pub sheets: Option<SheetMap>,
}

/// JSON object of sheet name to rows, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetMap(pub Vec<(String, Vec<Vec<Value>>)>);

impl<'de> Deserialize<'de> for SheetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SheetMapVisitor)
    }
}

struct SheetMapVisitor;

impl<'de> Visitor<'de> for SheetMapVisitor {
    type Value = SheetMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of sheet names to rows")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SheetMap, A::Error> {
        let mut sheets = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, rows)) = map.next_entry::<String, Vec<Vec<Value>>>()? {
            sheets.push((name, rows));
        }
        Ok(SheetMap(sheets))
    }
}

impl From<WorkbookPayload> for Workbook {
    fn from(payload: WorkbookPayload) -> Self {
        let sheets = payload
            .sheets
            .unwrap_or_default()
            .0
            .into_iter()
            .map(|(name, rows)| {
                let rows = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(Cell::from).collect())
                    .collect();
                Sheet::new(name, rows)
            })
            .collect();
        Self { sheets }
    }
}
