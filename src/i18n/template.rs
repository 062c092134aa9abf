//! Templates and their per-language translations.

use crate::i18n::pattern::Pattern;
use crate::i18n::transform::ValueTransform;
use std::fmt;
use std::sync::Arc;

/// Handle to a registered template, returned by
/// [`TemplateRegistry::register`](crate::i18n::TemplateRegistry::register).
///
/// The wrapped index is the template's registration order, which is also
/// its match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateHandle(pub(crate) usize);

impl TemplateHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A language-specific rendering plus an optional value transform.
#[derive(Clone)]
pub struct Translation {
    rendering: Pattern,
    transform: Option<Arc<dyn ValueTransform>>,
}

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            rendering: Pattern::new(text),
            transform: None,
        }
    }

    pub fn with_transform(text: impl Into<String>, transform: Arc<dyn ValueTransform>) -> Self {
        Self {
            rendering: Pattern::new(text),
            transform: Some(transform),
        }
    }

    pub fn text(&self) -> &str {
        self.rendering.as_str()
    }

    pub fn rendering(&self) -> &Pattern {
        &self.rendering
    }

    pub fn transform(&self) -> Option<&dyn ValueTransform> {
        self.transform.as_deref()
    }
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translation")
            .field("text", &self.text())
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

/// A registered pattern with one translation slot per language.
///
/// The slot count always equals the size of the registry's language set.
#[derive(Debug, Clone)]
pub struct Template {
    pattern: Pattern,
    translations: Vec<Option<Translation>>,
}

impl Template {
    pub(crate) fn new(pattern: impl Into<String>, language_count: usize) -> Self {
        Self {
            pattern: Pattern::new(pattern),
            translations: vec![None; language_count],
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The translation stored for a language index, if set.
    pub fn translation(&self, language: usize) -> Option<&Translation> {
        self.translations.get(language).and_then(Option::as_ref)
    }

    /// All slots in language order; `None` marks an unset slot.
    pub fn translations(&self) -> &[Option<Translation>] {
        &self.translations
    }

    /// Store a translation, overwriting any earlier one.
    pub(crate) fn set_translation(&mut self, language: usize, translation: Translation) {
        self.translations[language] = Some(translation);
    }
}
