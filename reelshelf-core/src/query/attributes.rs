//! Membership tests against the list-valued keys of a record's attribute bag.
//!
//! All comparisons are exact and case-sensitive. An absent key, an empty
//! list or a value of the wrong shape simply does not match.

use reelshelf_model::{CodeName, FilmAttributes};

/// True when any listed director equals `name`.
pub fn matches_director(attributes: &FilmAttributes, name: &str) -> bool {
    attributes.directors().iter().any(|director| director == name)
}

/// True when any spoken language has `term` as its code or its name.
pub fn matches_language(attributes: &FilmAttributes, term: &str) -> bool {
    any_code_or_name(attributes.languages(), term)
}

/// True when any production country has `term` as its code or its name.
pub fn matches_country(attributes: &FilmAttributes, term: &str) -> bool {
    any_code_or_name(attributes.countries(), term)
}

fn any_code_or_name(entries: &[CodeName], term: &str) -> bool {
    entries.iter().any(|entry| entry.matches(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> FilmAttributes {
        FilmAttributes::default()
            .with_directors(["Lana Wachowski", "Lilly Wachowski"])
            .with_languages(vec![CodeName::new("en", "English")])
            .with_countries(vec![CodeName::new("US", "United States")])
    }

    #[test]
    fn director_match_is_exact() {
        let attrs = matrix();
        assert!(matches_director(&attrs, "Lana Wachowski"));
        assert!(!matches_director(&attrs, "lana wachowski"));
        assert!(!matches_director(&attrs, "Lana"));
        assert!(!matches_director(&attrs, " Lana Wachowski"));
    }

    #[test]
    fn language_matches_code_or_name() {
        let attrs = matrix();
        let cases = [
            ("en", true),
            ("English", true),
            ("english", false),
            ("EN", false),
            ("fr", false),
        ];
        for (term, expected) in cases {
            assert_eq!(matches_language(&attrs, term), expected, "term {term:?}");
        }
    }

    #[test]
    fn country_matches_code_or_name() {
        let attrs = matrix();
        assert!(matches_country(&attrs, "US"));
        assert!(matches_country(&attrs, "United States"));
        assert!(!matches_country(&attrs, "us"));
    }

    #[test]
    fn absent_and_empty_lists_never_match() {
        let absent = FilmAttributes::default();
        assert!(!matches_director(&absent, "Anyone"));
        assert!(!matches_language(&absent, "en"));
        assert!(!matches_country(&absent, "US"));

        let empty = FilmAttributes::default()
            .with_directors(Vec::<String>::new())
            .with_languages(Vec::new());
        assert!(!matches_director(&empty, "Anyone"));
        assert!(!matches_language(&empty, "en"));
    }

    #[test]
    fn malformed_stored_attributes_never_match() {
        let value = serde_json::json!({
            "directors": "Lana Wachowski",
            "languages": [{"iso": "en"}]
        });
        let attrs = FilmAttributes::from_json_value(&value);
        assert!(!matches_director(&attrs, "Lana Wachowski"));
        assert!(!matches_language(&attrs, "en"));
    }
}
