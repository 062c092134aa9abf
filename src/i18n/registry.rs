//! Template registry: registration and resolution.
//!
//! Templates are registered during a setup phase and then read by any
//! number of resolution calls. Registration takes `&mut self`, resolution
//! takes `&self`, so the borrow checker enforces the
//! register-then-read-many lifecycle; a settled registry can be shared
//! across threads.

use crate::error::{LocalizeError, Result};
use crate::i18n::compose::compose;
use crate::i18n::extract::extract;
use crate::i18n::language::LanguageSet;
use crate::i18n::matcher::find_match;
use crate::i18n::metrics::ResolutionMetrics;
use crate::i18n::template::{Template, TemplateHandle, Translation};
use crate::i18n::transform::{Bindings, ValueTransform};
use crate::i18n::validator::{TranslationValidator, ValidationReport};
use std::sync::Arc;
use tracing::debug;

/// Ordered collection of error templates keyed by a fixed language set.
///
/// Registration order is match priority: when two templates match the
/// same text, the one registered first wins.
#[derive(Debug)]
pub struct TemplateRegistry {
    languages: LanguageSet,
    templates: Vec<Template>,
    metrics: ResolutionMetrics,
}

impl TemplateRegistry {
    /// Create an empty registry for the given language codes.
    ///
    /// # Example
    /// ```
    /// use error_localizer::i18n::TemplateRegistry;
    ///
    /// let mut registry = TemplateRegistry::new(["English", "Norwegian Bokmål"]);
    /// let handle = registry.register("dial tcp: lookup {{ host }}: no such host");
    /// registry
    ///     .set_translation(handle, "English", "Unable to reach {{ host }}.")
    ///     .unwrap();
    ///
    /// let message = registry
    ///     .resolve("English", "dial tcp: lookup db.internal: no such host")
    ///     .unwrap();
    /// assert_eq!(message, "Unable to reach db.internal.");
    /// ```
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_languages(LanguageSet::new(languages))
    }

    pub fn with_languages(languages: LanguageSet) -> Self {
        Self {
            languages,
            templates: Vec::new(),
            metrics: ResolutionMetrics::new(),
        }
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    /// Register a pattern with every translation slot empty.
    ///
    /// The pattern is not validated; see [`TemplateRegistry::validate`].
    pub fn register(&mut self, pattern: impl Into<String>) -> TemplateHandle {
        let handle = TemplateHandle(self.templates.len());
        let template = Template::new(pattern, self.languages.len());
        debug!(
            "Registered template {}: {}",
            handle.index(),
            template.pattern().as_str()
        );
        self.templates.push(template);
        handle
    }

    /// Look up the index of a language code.
    pub fn language_index(&self, code: &str) -> Result<usize> {
        self.languages.index_of(code)
    }

    /// Set the rendering of a template for a language, overwriting any
    /// earlier one.
    pub fn set_translation(
        &mut self,
        handle: TemplateHandle,
        language: &str,
        text: impl Into<String>,
    ) -> Result<()> {
        self.store(handle, language, Translation::new(text))
    }

    /// Like [`set_translation`](Self::set_translation), with a hook that
    /// may rewrite extracted values before they are substituted.
    pub fn set_translation_with_transform<T>(
        &mut self,
        handle: TemplateHandle,
        language: &str,
        text: impl Into<String>,
        transform: T,
    ) -> Result<()>
    where
        T: ValueTransform + 'static,
    {
        self.set_translation_with_shared_transform(handle, language, text, Arc::new(transform))
    }

    /// Attach a transform that is shared with other translations.
    pub fn set_translation_with_shared_transform(
        &mut self,
        handle: TemplateHandle,
        language: &str,
        text: impl Into<String>,
        transform: Arc<dyn ValueTransform>,
    ) -> Result<()> {
        self.store(handle, language, Translation::with_transform(text, transform))
    }

    fn store(
        &mut self,
        handle: TemplateHandle,
        language: &str,
        translation: Translation,
    ) -> Result<()> {
        let index = self.language_index(language)?;
        let template = self
            .templates
            .get_mut(handle.index())
            .ok_or(LocalizeError::UnknownTemplate(handle.index()))?;
        template.set_translation(index, translation);
        Ok(())
    }

    pub fn template(&self, handle: TemplateHandle) -> Option<&Template> {
        self.templates.get(handle.index())
    }

    /// Templates in registration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    /// Find the first-registered template whose pattern matches `text`.
    pub fn find_template(&self, text: &str) -> Option<TemplateHandle> {
        find_match(self.templates.iter().map(Template::pattern), text).map(TemplateHandle)
    }

    /// Extract placeholder values of a template from `text`.
    pub fn extract(&self, handle: TemplateHandle, text: &str) -> Result<Bindings> {
        let template = self
            .template(handle)
            .ok_or(LocalizeError::UnknownTemplate(handle.index()))?;
        Ok(extract(template.pattern(), text))
    }

    /// Render raw error text in the requested language.
    ///
    /// # Returns
    /// * `Ok(message)` with the matched template's translation filled in
    /// * `Err(LocalizeError::UnknownLanguage)` if the language is not configured
    /// * `Err(LocalizeError::NoMatchingTemplate)` if no pattern matches
    /// * `Err(LocalizeError::MissingTranslation)` if the matched template
    ///   has no translation for the language
    pub fn resolve(&self, language: &str, text: &str) -> Result<String> {
        let result = self.resolve_text(language, text);

        match &result {
            Ok(_) => self.metrics.record_resolved(),
            Err(LocalizeError::UnknownLanguage(_)) => self.metrics.record_unknown_language(),
            Err(LocalizeError::NoMatchingTemplate) => self.metrics.record_no_match(),
            Err(LocalizeError::MissingTranslation { .. }) => {
                self.metrics.record_missing_translation()
            }
            Err(_) => {}
        }

        result
    }

    /// Render an error value through its `Display` text.
    pub fn resolve_error(
        &self,
        language: &str,
        error: &(dyn std::error::Error + 'static),
    ) -> Result<String> {
        self.resolve(language, &error.to_string())
    }

    fn resolve_text(&self, language: &str, text: &str) -> Result<String> {
        let language_index = self.language_index(language)?;

        let handle = self
            .find_template(text)
            .ok_or(LocalizeError::NoMatchingTemplate)?;
        let template = &self.templates[handle.index()];
        debug!("Matched template {} for text: {}", handle.index(), text);

        let translation =
            template
                .translation(language_index)
                .ok_or_else(|| LocalizeError::MissingTranslation {
                    template: handle.index(),
                    language: language.to_string(),
                })?;

        let mut bindings = extract(template.pattern(), text);
        if let Some(transform) = translation.transform() {
            debug!("Applying value transform for {}", language);
            transform.transform(language, &mut bindings);
        }

        Ok(compose(translation.rendering(), &bindings))
    }

    /// Check every template and translation for structural problems.
    pub fn validate(&self) -> ValidationReport {
        let mut report = TranslationValidator::validate_languages(&self.languages);

        for (index, template) in self.templates.iter().enumerate() {
            report.merge(
                TranslationValidator::validate_pattern(template.pattern().as_str()),
                &format!("template {}", index),
            );

            for (language_index, slot) in template.translations().iter().enumerate() {
                let language = self.languages.code(language_index).unwrap_or_default();
                match slot {
                    Some(translation) => report.merge(
                        TranslationValidator::validate_translation(
                            template.pattern().as_str(),
                            translation.text(),
                        ),
                        &format!("template {} ({})", index, language),
                    ),
                    None => report.warnings.push(format!(
                        "template {}: no translation for '{}'",
                        index, language
                    )),
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "English";
    const NORWEGIAN: &str = "Norwegian Bokmål";
    const DUPLICATE_KEY: &str =
        r#"pq: duplicate key value violates unique constraint "{{ table }}_{{ column }}_key""#;
    const DUPLICATE_KEY_TEXT: &str =
        r#"pq: duplicate key value violates unique constraint "users_email_key""#;

    fn registry() -> TemplateRegistry {
        TemplateRegistry::new([ENGLISH, NORWEGIAN])
    }

    fn with_duplicate_key(registry: &mut TemplateRegistry) -> TemplateHandle {
        let handle = registry.register(DUPLICATE_KEY);
        registry
            .set_translation(handle, ENGLISH, "This {{ column }} already exists in {{ table }}.")
            .unwrap();
        registry
            .set_translation(
                handle,
                NORWEGIAN,
                "Denne {{ column }} eksisterer allerede i {{ table }}.",
            )
            .unwrap();
        handle
    }

    // ==================== Registration Tests ====================

    #[test]
    fn test_register_returns_sequential_handles() {
        let mut registry = registry();
        assert_eq!(registry.register("a").index(), 0);
        assert_eq!(registry.register("b").index(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_creates_slot_per_language() {
        let mut registry = registry();
        let handle = registry.register("a");
        let template = registry.template(handle).unwrap();
        assert_eq!(template.translations().len(), 2);
        assert!(template.translations().iter().all(Option::is_none));
    }

    #[test]
    fn test_register_accepts_unbalanced_markers() {
        let mut registry = registry();
        let handle = registry.register("broken {{ name");
        assert!(registry.template(handle).is_some());
    }

    #[test]
    fn test_set_translation_unknown_language() {
        let mut registry = registry();
        let handle = registry.register("a");
        let result = registry.set_translation(handle, "Spanish", "b");
        assert!(matches!(result, Err(LocalizeError::UnknownLanguage(_))));
    }

    #[test]
    fn test_set_translation_unknown_handle() {
        let mut registry = registry();
        let result = registry.set_translation(TemplateHandle(7), ENGLISH, "b");
        assert!(matches!(result, Err(LocalizeError::UnknownTemplate(7))));
    }

    #[test]
    fn test_set_translation_overwrites() {
        let mut registry = registry();
        let handle = registry.register("boom");
        registry.set_translation(handle, ENGLISH, "first").unwrap();
        registry.set_translation(handle, ENGLISH, "second").unwrap();
        assert_eq!(registry.resolve(ENGLISH, "boom").unwrap(), "second");
    }

    #[test]
    fn test_language_index() {
        let registry = registry();
        assert_eq!(registry.language_index(ENGLISH).unwrap(), 0);
        assert_eq!(registry.language_index(NORWEGIAN).unwrap(), 1);
        assert!(registry.language_index("Swedish").is_err());
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_resolve_english() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        assert_eq!(
            registry.resolve(ENGLISH, DUPLICATE_KEY_TEXT).unwrap(),
            "This email already exists in users."
        );
    }

    #[test]
    fn test_resolve_norwegian() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        assert_eq!(
            registry.resolve(NORWEGIAN, DUPLICATE_KEY_TEXT).unwrap(),
            "Denne email eksisterer allerede i users."
        );
    }

    #[test]
    fn test_resolve_unknown_language() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        let result = registry.resolve("Danish", DUPLICATE_KEY_TEXT);
        assert!(matches!(result, Err(LocalizeError::UnknownLanguage(ref code)) if code == "Danish"));
    }

    #[test]
    fn test_resolve_no_matching_template() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        let result = registry.resolve(ENGLISH, "EOF");
        assert!(matches!(result, Err(LocalizeError::NoMatchingTemplate)));
    }

    #[test]
    fn test_resolve_empty_registry() {
        let result = registry().resolve(ENGLISH, "anything");
        assert!(matches!(result, Err(LocalizeError::NoMatchingTemplate)));
    }

    #[test]
    fn test_resolve_missing_translation() {
        let mut registry = registry();
        let handle = registry.register("boom");
        registry.set_translation(handle, ENGLISH, "Boom!").unwrap();

        let result = registry.resolve(NORWEGIAN, "boom");
        assert!(matches!(
            result,
            Err(LocalizeError::MissingTranslation { template: 0, ref language }) if language == NORWEGIAN
        ));
    }

    #[test]
    fn test_resolve_with_transform_only_affects_its_language() {
        let mut registry = registry();
        let handle = registry.register(DUPLICATE_KEY);
        registry
            .set_translation(handle, ENGLISH, "This {{ column }} already exists in {{ table }}.")
            .unwrap();
        registry
            .set_translation_with_transform(
                handle,
                NORWEGIAN,
                "Denne {{ column }} eksisterer allerede i {{ table }}.",
                |_: &str, data: &mut Bindings| {
                    for value in data.values_mut() {
                        *value = value.to_uppercase();
                    }
                },
            )
            .unwrap();

        assert_eq!(
            registry.resolve(NORWEGIAN, DUPLICATE_KEY_TEXT).unwrap(),
            "Denne EMAIL eksisterer allerede i USERS."
        );
        assert_eq!(
            registry.resolve(ENGLISH, DUPLICATE_KEY_TEXT).unwrap(),
            "This email already exists in users."
        );
    }

    #[test]
    fn test_transform_receives_language_code() {
        let mut registry = registry();
        let handle = registry.register("lang {{ x }}!");
        let echo_language = |language: &str, data: &mut Bindings| {
            data.insert("x".to_string(), language.to_string());
        };
        registry
            .set_translation_with_transform(handle, NORWEGIAN, "{{ x }}", echo_language)
            .unwrap();
        assert_eq!(registry.resolve(NORWEGIAN, "lang y!").unwrap(), NORWEGIAN);
    }

    #[test]
    fn test_resolve_error_uses_display_text() {
        let mut registry = registry();
        let handle = registry.register("file {{ name }} not found");
        registry
            .set_translation(handle, ENGLISH, "Missing file: {{ name }}")
            .unwrap();

        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "file config.toml not found");
        assert_eq!(
            registry.resolve_error(ENGLISH, &err).unwrap(),
            "Missing file: config.toml"
        );
    }

    // ==================== Stage Tests ====================

    #[test]
    fn test_find_template_and_extract() {
        let mut registry = registry();
        registry.register("dial tcp: lookup port=: no such host");
        let handle = with_duplicate_key(&mut registry);

        assert_eq!(registry.find_template(DUPLICATE_KEY_TEXT), Some(handle));
        let data = registry.extract(handle, DUPLICATE_KEY_TEXT).unwrap();
        assert_eq!(data["table"], "users");
        assert_eq!(data["column"], "email");
    }

    #[test]
    fn test_extract_unknown_handle() {
        let result = registry().extract(TemplateHandle(0), "x");
        assert!(matches!(result, Err(LocalizeError::UnknownTemplate(0))));
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_resolve_records_metrics() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);

        registry.resolve(ENGLISH, DUPLICATE_KEY_TEXT).unwrap();
        registry.resolve(ENGLISH, "nope").unwrap_err();
        registry.resolve("Danish", DUPLICATE_KEY_TEXT).unwrap_err();

        let boom = registry.register("boom");
        registry.set_translation(boom, ENGLISH, "Boom!").unwrap();
        let err = registry.resolve(NORWEGIAN, "boom").unwrap_err();
        assert!(matches!(err, LocalizeError::MissingTranslation { .. }));

        let report = registry.metrics().report();
        assert_eq!(report.resolved, 1);
        assert_eq!(report.no_match, 1);
        assert_eq!(report.unknown_language, 1);
        assert_eq!(report.missing_translation, 1);
        assert_eq!(report.attempts, 4);
    }

    #[test]
    fn test_resolve_adjacent_placeholders_round_trip_multibyte() {
        let mut registry = registry();
        let handle = registry.register("{{a}}{{b}}.");
        registry.set_translation(handle, ENGLISH, "{{a}}{{b}}").unwrap();

        assert_eq!(registry.resolve(ENGLISH, "éx.").unwrap(), "éx");
        assert_eq!(registry.resolve(ENGLISH, "Ærø.").unwrap(), "Ærø");
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_reports_missing_translation() {
        let mut registry = registry();
        let handle = registry.register("boom");
        registry.set_translation(handle, ENGLISH, "Boom!").unwrap();

        let report = registry.validate();
        assert!(!report.has_errors());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("no translation for 'Norwegian Bokmål'")));
    }

    #[test]
    fn test_validate_clean_registry() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        assert!(registry.validate().is_clean());
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_concurrent_resolution() {
        let mut registry = registry();
        with_duplicate_key(&mut registry);
        let registry = &registry;

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(
                            registry.resolve(NORWEGIAN, DUPLICATE_KEY_TEXT).unwrap(),
                            "Denne email eksisterer allerede i users."
                        );
                    }
                });
            }
        });

        assert_eq!(registry.metrics().resolved(), 200);
    }
}
