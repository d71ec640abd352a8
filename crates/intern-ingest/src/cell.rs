//! Raw cell values as read from a workbook.

use std::fmt;

use calamine::Data;
use serde_json::Value;

/// One heterogeneous spreadsheet cell.
///
/// Native spreadsheet dates are carried as their serial day number in
/// [`Cell::Number`]; [`crate::parse_date`] decodes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Renders numbers the way spreadsheet exports print them: integral values
/// without a fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
                Self::Text(value.clone())
            }
            Data::Float(value) => Self::Number(*value),
            Data::Int(value) => Self::Number(*value as f64),
            Data::Bool(value) => Self::Bool(*value),
            Data::DateTime(value) => Self::Number(value.as_f64()),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(number) => number.as_f64().map_or(Self::Empty, Self::Number),
            Value::String(text) if text.is_empty() => Self::Empty,
            Value::String(text) => Self::Text(text),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(12_345_678.0).to_string(), "12345678");
        assert_eq!(Cell::Number(14.5).to_string(), "14.5");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn json_values_map_to_cells() {
        assert_eq!(Cell::from(serde_json::json!(null)), Cell::Empty);
        assert_eq!(Cell::from(serde_json::json!("")), Cell::Empty);
        assert_eq!(Cell::from(serde_json::json!(3)), Cell::Number(3.0));
        assert_eq!(Cell::from(serde_json::json!("x")), Cell::text("x"));
    }

    #[test]
    fn calamine_dates_become_serials() {
        let cell = Cell::from(&Data::Float(45_000.0));
        assert_eq!(cell, Cell::Number(45_000.0));
        assert!(Cell::from(&Data::Empty).is_blank());
    }
}
