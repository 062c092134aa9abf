//! Value transform hooks.
//!
//! A hook runs after extraction and before composition, and may rewrite
//! extracted values in place (e.g. swap `users` for a localized noun). It
//! has no error channel: anything that goes wrong is logged and skipped by
//! the hook itself.

use std::collections::HashMap;
use tracing::debug;

/// Placeholder name → extracted value.
pub type Bindings = HashMap<String, String>;

/// Rewrites extracted bindings for a target language before composition.
///
/// Implementations must only change values of existing keys and must not
/// block. Any closure `Fn(&str, &mut Bindings)` is a transform.
pub trait ValueTransform: Send + Sync {
    fn transform(&self, language: &str, bindings: &mut Bindings);
}

impl<F> ValueTransform for F
where
    F: Fn(&str, &mut Bindings) + Send + Sync,
{
    fn transform(&self, language: &str, bindings: &mut Bindings) {
        self(language, bindings)
    }
}

/// Per-language replacement table for extracted values.
///
/// Values without an entry for the target language are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    by_language: HashMap<String, HashMap<String, String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement of `value` by `replacement` for `language`.
    pub fn with(
        mut self,
        language: impl Into<String>,
        value: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.insert(language, value, replacement);
        self
    }

    pub fn insert(
        &mut self,
        language: impl Into<String>,
        value: impl Into<String>,
        replacement: impl Into<String>,
    ) {
        self.by_language
            .entry(language.into())
            .or_default()
            .insert(value.into(), replacement.into());
    }

    pub fn lookup(&self, language: &str, value: &str) -> Option<&str> {
        self.by_language
            .get(language)
            .and_then(|table| table.get(value))
            .map(String::as_str)
    }
}

impl From<HashMap<String, HashMap<String, String>>> for SynonymTable {
    fn from(by_language: HashMap<String, HashMap<String, String>>) -> Self {
        Self { by_language }
    }
}

impl ValueTransform for SynonymTable {
    fn transform(&self, language: &str, bindings: &mut Bindings) {
        let Some(table) = self.by_language.get(language) else {
            return;
        };

        for (name, value) in bindings.iter_mut() {
            if let Some(replacement) = table.get(value.as_str()) {
                debug!("Replaced {} value '{}' with '{}'", name, value, replacement);
                *value = replacement.clone();
            }
        }
    }
}
