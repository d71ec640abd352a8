use intern_ingest::{Cell, clean_number, clean_score, clean_string, normalize_company_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn text_without_digits_cleans_to_zero(value in "[a-zA-Z ,;:/éè]*") {
        let cell = Cell::text(value);
        prop_assert_eq!(clean_number(Some(&cell)), 0.0);
        prop_assert_eq!(clean_score(Some(&cell)), None);
    }

    #[test]
    fn integers_survive_cleaning(value in 0u32..1_000_000) {
        let cell = Cell::text(format!("{value}"));
        prop_assert_eq!(clean_number(Some(&cell)), f64::from(value));
    }

    #[test]
    fn cleaned_strings_have_no_outer_whitespace(value in "\\PC*") {
        let cleaned = clean_string(Some(&Cell::text(value)));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn normalized_names_have_no_whitespace(value in "\\PC*") {
        let normalized = normalize_company_name(&value);
        prop_assert!(!normalized.chars().any(char::is_whitespace));
    }

    #[test]
    fn ascii_case_does_not_matter(value in "[a-zA-Z .-]{0,24}") {
        prop_assert_eq!(
            normalize_company_name(&value.to_uppercase()),
            normalize_company_name(&value.to_lowercase())
        );
    }
}
