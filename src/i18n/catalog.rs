//! Catalog files: templates and translations loaded from JSON.
//!
//! ```json
//! {
//!   "languages": ["English", "Norwegian Bokmål"],
//!   "templates": [
//!     {
//!       "pattern": "dial tcp: lookup port=: no such host",
//!       "translations": { "English": "Unable to connect to external service." }
//!     }
//!   ],
//!   "synonyms": { "Norwegian Bokmål": { "email": "eposten" } }
//! }
//! ```
//!
//! Templates are registered in file order, which is their match priority.
//! Every translation in a language listed under `synonyms` gets the
//! synonym table attached as its value transform.

use crate::error::Result;
use crate::i18n::registry::TemplateRegistry;
use crate::i18n::transform::{SynonymTable, ValueTransform};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One template with its renderings keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTemplate {
    pub pattern: String,

    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

/// Deserialized catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Language codes in index order
    pub languages: Vec<String>,

    #[serde(default)]
    pub templates: Vec<CatalogTemplate>,

    /// Language → extracted value → replacement
    #[serde(default)]
    pub synonyms: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded {} templates in {} languages from {}",
            catalog.templates.len(),
            catalog.languages.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Register every template and translation in a new registry.
    ///
    /// # Returns
    /// * `Ok(TemplateRegistry)` ready for resolution
    /// * `Err(LocalizeError::UnknownLanguage)` if a translation or synonym
    ///   table names a language outside `languages`
    pub fn into_registry(self) -> Result<TemplateRegistry> {
        let mut registry = TemplateRegistry::new(self.languages);

        for language in self.synonyms.keys() {
            registry.language_index(language)?;
        }
        let synonym_languages: Vec<String> = self.synonyms.keys().cloned().collect();
        let synonyms: Arc<dyn ValueTransform> = Arc::new(SynonymTable::from(self.synonyms));

        for entry in self.templates {
            let handle = registry.register(entry.pattern);
            for (language, text) in entry.translations {
                if synonym_languages.contains(&language) {
                    registry.set_translation_with_shared_transform(
                        handle,
                        &language,
                        text,
                        Arc::clone(&synonyms),
                    )?;
                } else {
                    registry.set_translation(handle, &language, text)?;
                }
            }
        }

        Ok(registry)
    }
}
