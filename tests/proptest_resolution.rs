//! Property-based tests for template resolution.
//!
//! 1. Values substituted into a pattern are recovered by extraction
//! 2. Resolution re-renders the recovered values into the translation
//! 3. The earliest-registered of two matching templates always wins
//! 4. A placeholder-free pattern matches its own text exactly
//! 5. Unknown language codes always fail with UnknownLanguage
//! 6. Text starting with a byte no pattern starts with never matches
//! 7. Resolution never panics on arbitrary input

use error_localizer::i18n::{extract, Pattern};
use error_localizer::{LocalizeError, TemplateRegistry};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

const LANGUAGES: [&str; 2] = ["English", "Norwegian Bokmål"];

/// Placeholder values: non-empty, and free of the separator bytes used as
/// anchors in the generated patterns.
fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .@/-]{1,12}"
}

/// Literal separators. Each starts with a byte that never occurs in values.
fn separator() -> impl Strategy<Value = String> {
    "[_:|\"=][a-z:|_ ]{0,6}"
}

fn build(
    prefix: &str,
    separators: &[String],
    values: &[String],
) -> (String, String, String) {
    let mut pattern = prefix.to_string();
    let mut text = prefix.to_string();
    let mut rendering = String::from("Got");

    for (index, (value, separator)) in values.iter().zip(separators).enumerate() {
        pattern.push_str(&format!("{{{{ v{} }}}}{}", index, separator));
        text.push_str(value);
        text.push_str(separator);
        rendering.push_str(&format!(" <{{{{v{}}}}}>", index));
    }

    (pattern, text, rendering)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Extraction and resolution recover substituted values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extraction_recovers_values(
        prefix in "[a-z]{1,8}: ",
        parts in prop::collection::vec((value(), separator()), 1..5),
    ) {
        let (values, separators): (Vec<String>, Vec<String>) = parts.into_iter().unzip();
        let (pattern, text, _) = build(&prefix, &separators, &values);

        let bindings = extract(&Pattern::new(pattern), &text);
        prop_assert_eq!(bindings.len(), values.len());
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(&bindings[&format!("v{}", index)], value);
        }
    }

    #[test]
    fn resolution_rerenders_values(
        prefix in "[a-z]{1,8}: ",
        parts in prop::collection::vec((value(), separator()), 1..5),
    ) {
        let (values, separators): (Vec<String>, Vec<String>) = parts.into_iter().unzip();
        let (pattern, text, rendering) = build(&prefix, &separators, &values);

        let mut registry = TemplateRegistry::new(LANGUAGES);
        let handle = registry.register(pattern);
        registry.set_translation(handle, "English", rendering).unwrap();

        let expected: String = std::iter::once("Got".to_string())
            .chain(values.iter().map(|v| format!(" <{}>", v)))
            .collect();
        prop_assert_eq!(registry.resolve("English", &text).unwrap(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. First registered template wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_registered_wins(
        prefix in "[a-z]{1,8}: ",
        value in value(),
        rename in "[a-z]{1,6}",
    ) {
        let mut registry = TemplateRegistry::new(LANGUAGES);
        let first = registry.register(format!("{}{{{{ a }}}}_", prefix));
        let second = registry.register(format!("{}{{{{ {} }}}}_", prefix, rename));
        registry.set_translation(first, "English", "first").unwrap();
        registry.set_translation(second, "English", "second").unwrap();

        let text = format!("{}{}_", prefix, value);
        prop_assert_eq!(registry.find_template(&text), Some(first));
        prop_assert_eq!(registry.resolve("English", &text).unwrap(), "first");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Placeholder-free patterns
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn literal_pattern_matches_itself(literal in "[a-zA-Z0-9 :=._-]{1,40}") {
        let mut registry = TemplateRegistry::new(LANGUAGES);
        let handle = registry.register(literal.clone());
        registry.set_translation(handle, "English", "ok").unwrap();

        prop_assert_eq!(registry.resolve("English", &literal).unwrap(), "ok");
    }

    #[test]
    fn literal_pattern_rejects_changed_text(
        literal in "[a-z]{2,40}",
        index in any::<prop::sample::Index>(),
    ) {
        let position = index.index(literal.len());
        let mut changed = literal.clone().into_bytes();
        changed[position] = b'#';
        let changed = String::from_utf8(changed).unwrap();

        let mut registry = TemplateRegistry::new(LANGUAGES);
        let handle = registry.register(literal);
        registry.set_translation(handle, "English", "ok").unwrap();

        let result = registry.resolve("English", &changed);
        prop_assert!(matches!(result, Err(LocalizeError::NoMatchingTemplate)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-7. Failure modes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_language_always_fails(
        language in "[A-Za-z ]{0,20}",
        text in ".{0,40}",
    ) {
        prop_assume!(!LANGUAGES.contains(&language.as_str()));

        let mut registry = TemplateRegistry::new(LANGUAGES);
        let handle = registry.register("{{ anything }}.");
        registry.set_translation(handle, "English", "x").unwrap();

        let result = registry.resolve(&language, &text);
        prop_assert!(matches!(result, Err(LocalizeError::UnknownLanguage(_))));
    }

    #[test]
    fn unrelated_text_never_matches(text in "[0-9][a-z0-9 ]{0,40}") {
        let mut registry = TemplateRegistry::new(LANGUAGES);
        for pattern in ["dial tcp: {{ addr }}: no such host", "pq: {{ detail }}.", "EOF"] {
            let handle = registry.register(pattern);
            registry.set_translation(handle, "English", "x").unwrap();
        }

        let result = registry.resolve("English", &text);
        prop_assert!(matches!(result, Err(LocalizeError::NoMatchingTemplate)));
    }

    #[test]
    fn resolve_never_panics(pattern in ".{0,30}", text in ".{0,60}") {
        let mut registry = TemplateRegistry::new(LANGUAGES);
        let handle = registry.register(pattern);
        registry.set_translation(handle, "English", "{{ a }}{{b}}").unwrap();

        let _ = registry.resolve("English", &text);
    }
}
