//! Slug derivation
//!
//! Slugs are URL-safe identifiers derived from display titles: lowercase
//! ASCII word characters separated by single hyphens.

use std::sync::OnceLock;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_\s-]").expect("static slug pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static slug pattern"))
}

fn hyphen_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").expect("static slug pattern"))
}

/// Derive a slug from a title.
///
/// Diacritics are stripped through canonical decomposition, so
/// `"Variáveis e Tipos!"` becomes `"variaveis-e-tipos"`. Characters with no
/// ASCII base letter are dropped. The result may be empty.
pub fn generate_slug(text: &str) -> String {
    let decomposed: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let cleaned = disallowed_chars().replace_all(&decomposed, "");
    let hyphenated = whitespace_runs().replace_all(cleaned.trim(), "-");
    let collapsed = hyphen_runs().replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').to_string()
}

/// Prefer a stored slug, falling back to one derived from the title.
/// Blank stored slugs count as absent.
pub fn slug_or_derived(stored: Option<&str>, title: &str) -> String {
    match stored {
        Some(slug) if !slug.trim().is_empty() => slug.to_string(),
        _ => generate_slug(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_slug_strips_diacritics_and_punctuation() {
        assert_eq!(generate_slug("Variáveis e Tipos!"), "variaveis-e-tipos");
        assert_eq!(generate_slug("Introdução à Programação"), "introducao-a-programacao");
    }

    #[test]
    fn test_generate_slug_collapses_separators() {
        assert_eq!(generate_slug("  Loops -- and   Conditionals  "), "loops-and-conditionals");
        assert_eq!(generate_slug("---Arrays---"), "arrays");
        assert_eq!(generate_slug("C# & .NET"), "c-net");
    }

    #[test]
    fn test_generate_slug_keeps_underscores_and_digits() {
        assert_eq!(generate_slug("snake_case 101"), "snake_case-101");
    }

    #[test]
    fn test_generate_slug_drops_non_decomposable_letters() {
        assert_eq!(generate_slug("Straße"), "strae");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_slug_or_derived() {
        assert_eq!(slug_or_derived(Some("custom-slug"), "Ignored Title"), "custom-slug");
        assert_eq!(slug_or_derived(Some("  "), "Funções"), "funcoes");
        assert_eq!(slug_or_derived(None, "Funções"), "funcoes");
    }

    proptest! {
        #[test]
        fn prop_slug_is_url_safe(input in "\\PC*") {
            let slug = generate_slug(&input);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_slug_is_idempotent(input in "[a-zA-Z0-9 _áéíóúçã!?.-]{0,40}") {
            let once = generate_slug(&input);
            prop_assert_eq!(generate_slug(&once), once);
        }
    }
}
