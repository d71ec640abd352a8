//! Academic year extraction from sheet names.

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use intern_model::Year;
use regex::Regex;

static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}").expect("Invalid year token regex"));

/// First `20xx` token in a sheet name, if any.
///
/// `"Promo 2022-2023"` yields `2022`.
pub fn year_in_name(sheet_name: &str) -> Option<Year> {
    YEAR_TOKEN
        .find(sheet_name)
        .and_then(|token| Year::new(token.as_str()).ok())
}

/// Year of a sheet, falling back to `fallback` or the current calendar year.
pub fn extract_year(sheet_name: &str, fallback: Option<i32>) -> Year {
    year_in_name(sheet_name)
        .unwrap_or_else(|| Year::from_calendar(fallback.unwrap_or_else(|| Local::now().year())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_token_wins() {
        assert_eq!(year_in_name("Promo 2022-2023").unwrap().as_str(), "2022");
        assert_eq!(year_in_name("PFE_2021").unwrap().as_str(), "2021");
        assert!(year_in_name("Feuil1").is_none());
        assert!(year_in_name("1999").is_none());
    }

    #[test]
    fn fallback_is_used_without_token() {
        assert_eq!(extract_year("Feuil1", Some(2019)).as_str(), "2019");
        assert_eq!(extract_year("Promo 2024", Some(2019)).as_str(), "2024");
        let current = Local::now().year().to_string();
        assert_eq!(extract_year("Stagiaires", None).as_str(), current);
    }
}
