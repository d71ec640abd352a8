#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Academic year tag attached to every entity, e.g. `"2023"`.
///
/// Years are stored as strings because that is how they appear in the
/// persisted documents and in sheet names; ordering is lexicographic,
/// which matches numeric ordering for four-digit years.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Year(String);

impl Year {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidYear(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_calendar(year: i32) -> Self {
        Self(year.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_rejects_blank() {
        assert!(Year::new("   ").is_err());
        assert_eq!(Year::new(" 2022 ").unwrap().as_str(), "2022");
    }

    #[test]
    fn years_order_chronologically() {
        let mut years = vec![
            Year::from_calendar(2021),
            Year::from_calendar(2023),
            Year::from_calendar(2022),
        ];
        years.sort();
        assert_eq!(years.first().map(Year::as_str), Some("2021"));
    }
}
