//! Template and translation validation.
//!
//! Registration never rejects a pattern. This module reports patterns and
//! renderings whose structure will not behave as their author likely
//! expects: unclosed markers, placeholders without an anchor byte, names a
//! rendering uses but the pattern never binds.

use crate::i18n::language::LanguageSet;
use crate::i18n::pattern::{find_placeholders, Placeholder, CLOSE_MARKER, OPEN_MARKER};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a template unusable or unreachable
    pub errors: Vec<String>,

    /// Constructs that work but behave in surprising ways
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Append another report's findings, prefixed with `context`.
    pub fn merge(&mut self, other: ValidationReport, context: &str) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{}: {}", context, e)));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{}: {}", context, w)));
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for patterns, renderings and language sets.
pub struct TranslationValidator;

// Same pairing rule as the tokenizer: an open marker binds to the first
// close marker after it.
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate a template pattern.
    ///
    /// This function checks that:
    /// - the pattern is not empty (an empty pattern matches every text)
    /// - every open marker has a close marker
    /// - no close marker stands alone
    /// - every placeholder has a name
    /// - no placeholder ends the pattern (its content runs to the end of the text)
    /// - no two placeholders are adjacent (the first binds a single byte)
    pub fn validate_pattern(pattern: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if pattern.is_empty() {
            report
                .errors
                .push("Empty pattern matches every text".to_string());
            return report;
        }

        Self::check_markers(pattern, &mut report);

        let placeholders = find_placeholders(pattern);
        for (index, placeholder) in placeholders.iter().enumerate() {
            if placeholder.end == pattern.len() {
                report.warnings.push(format!(
                    "Placeholder '{}' ends the pattern and swallows the rest of the text",
                    placeholder.name
                ));
            }

            if let Some(next) = placeholders.get(index + 1) {
                if next.start == placeholder.end {
                    report.warnings.push(format!(
                        "Placeholders '{}' and '{}' are adjacent; '{}' binds a single byte",
                        placeholder.name, next.name, placeholder.name
                    ));
                }
            }
        }

        report
    }

    /// Validate a rendering against the pattern it translates.
    ///
    /// Names used by the rendering but never bound by the pattern compose
    /// as empty strings.
    pub fn validate_translation(pattern: &str, rendering: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::check_markers(rendering, &mut report);

        let bound = Self::extract_names(pattern);
        for name in Self::extract_names(rendering) {
            if !bound.contains(&name) {
                report.warnings.push(format!(
                    "Placeholder '{}' is never bound by the pattern and renders empty",
                    name
                ));
            }
        }

        report
    }

    /// Validate the configured language set.
    pub fn validate_languages(languages: &LanguageSet) -> ValidationReport {
        let mut report = ValidationReport::new();

        for code in languages.duplicates() {
            report.errors.push(format!(
                "Duplicate language code '{}'; later entries are unreachable",
                code
            ));
        }

        report
    }

    /// Extract all trimmed placeholder names from text, in order.
    pub fn extract_names(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
            .collect()
    }

    fn check_markers(text: &str, report: &mut ValidationReport) {
        let placeholders = find_placeholders(text);
        let paired_end = placeholders.last().map(|p| p.end).unwrap_or(0);

        if text[paired_end..].contains(OPEN_MARKER) {
            report
                .errors
                .push("Open marker '{{' has no matching '}}'".to_string());
        }

        if Self::has_stray_close(text, &placeholders) {
            report
                .warnings
                .push("Close marker '}}' outside a placeholder is literal text".to_string());
        }

        if placeholders.iter().any(|p| p.name.is_empty()) {
            report
                .warnings
                .push("Placeholder with an empty name".to_string());
        }
    }

    fn has_stray_close(text: &str, placeholders: &[Placeholder]) -> bool {
        let mut literal_start = 0;
        for placeholder in placeholders {
            if text[literal_start..placeholder.start].contains(CLOSE_MARKER) {
                return true;
            }
            literal_start = placeholder.end;
        }
        text[literal_start..].contains(CLOSE_MARKER)
    }
}
