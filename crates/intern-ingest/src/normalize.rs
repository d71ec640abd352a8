//! Company-name matching keys.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const APOSTROPHES: &[char] = &['\'', '\u{2019}', '\u{2018}', '`', '\u{00b4}', '\u{02bc}'];

/// Literal dropped from keys so "Société X" and "X" match.
const LEGAL_FORM_WORD: &str = "societe";

/// Builds the canonical key used to de-duplicate companies.
///
/// Lowercases, strips diacritics, turns apostrophes and punctuation into
/// separators, then removes every whitespace character and the word
/// "societe". The result is only a matching key; display names keep their
/// original spelling.
///
/// # Examples
///
/// ```
/// use intern_ingest::normalize_company_name;
///
/// assert_eq!(normalize_company_name("Société Générale"), "generale");
/// assert_eq!(normalize_company_name("  L'Oréal Tunisie "), "lorealtunisie");
/// assert_eq!(normalize_company_name(""), "");
/// ```
pub fn normalize_company_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let separated: String = trimmed
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| if is_separator(ch) { ' ' } else { ch })
        .collect();
    let compact: String = separated.chars().filter(|ch| !ch.is_whitespace()).collect();
    compact.replace(LEGAL_FORM_WORD, "").trim().to_string()
}

/// Natural key of a company: the normalized name, or the trimmed lowercase
/// display name without diacritics when normalization leaves nothing (e.g.
/// "Société" alone or a name written only in non-Latin script).
///
/// Parsing, reconciliation lookups and analytics all group on this key.
pub fn company_key(name: &str) -> String {
    let normalized = normalize_company_name(name);
    if normalized.is_empty() {
        name.trim()
            .to_lowercase()
            .nfd()
            .filter(|ch| !is_combining_mark(*ch))
            .collect()
    } else {
        normalized
    }
}

fn is_separator(ch: char) -> bool {
    let word_or_space = ch.is_ascii_alphanumeric() || ch == '_' || ch.is_whitespace();
    APOSTROPHES.contains(&ch) || !word_or_space
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_legal_form() {
        assert_eq!(normalize_company_name("Société Générale"), "generale");
        assert_eq!(normalize_company_name("SOCIETE GENERALE"), "generale");
    }

    #[test]
    fn punctuation_and_spacing_do_not_matter() {
        let a = normalize_company_name("Tunisie-Télécom");
        let b = normalize_company_name("tunisie   telecom.");
        assert_eq!(a, "tunisietelecom");
        assert_eq!(a, b);
    }

    #[test]
    fn apostrophe_variants_collapse() {
        assert_eq!(
            normalize_company_name("L\u{2019}Atelier"),
            normalize_company_name("L'Atelier")
        );
    }

    #[test]
    fn letters_outside_latin1_lose_only_their_marks() {
        assert_eq!(normalize_company_name("Škoda Auto"), "skodaauto");
        assert_eq!(normalize_company_name("Groupe Ştefan"), "groupestefan");
    }

    #[test]
    fn key_falls_back_to_display_name() {
        assert_eq!(company_key("Société Vermeg"), "vermeg");
        assert_eq!(company_key(" SOCIETE "), "societe");
        assert_eq!(company_key("Société"), "societe");
        assert_eq!(company_key("شركة"), "شركة");
        assert_eq!(company_key("   "), "");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(normalize_company_name("   "), "");
    }
}
