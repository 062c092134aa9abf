//! Error message localization.
//!
//! Raw error text from lower-level systems is matched against registered
//! templates (literal text with `{{ name }}` placeholders), the placeholder
//! values are extracted, and the matched template's translation for the
//! requested language is filled in with them.
//!
//! # Architecture
//!
//! - `language`: Fixed, ordered language set; a code's index is its identity
//! - `pattern`: Placeholder tokenizer shared by every stage
//! - `template`: Templates with one translation slot per language
//! - `matcher`: Simultaneous scan of every template over the text
//! - `extract`: Binds placeholder names to the text they cover
//! - `transform`: Optional hooks that rewrite values before composition
//! - `compose`: Fills a translation's placeholders
//! - `registry`: Registration and resolution entry point
//! - `catalog`: Templates and translations loaded from JSON
//! - `validator`: Static checks for patterns and translations
//! - `metrics`: Resolution outcome counters
//!
//! # Example
//!
//! ```rust
//! use error_localizer::i18n::TemplateRegistry;
//!
//! let mut registry = TemplateRegistry::new(["English", "Norwegian Bokmål"]);
//! let handle = registry.register(
//!     r#"pq: duplicate key value violates unique constraint "{{ table }}_{{ column }}_key""#,
//! );
//! registry.set_translation(handle, "English", "This {{ column }} already exists in {{ table }}.")?;
//!
//! let message = registry.resolve(
//!     "English",
//!     r#"pq: duplicate key value violates unique constraint "users_email_key""#,
//! )?;
//! assert_eq!(message, "This email already exists in users.");
//! # Ok::<(), error_localizer::LocalizeError>(())
//! ```

mod catalog;
mod compose;
mod extract;
mod language;
mod matcher;
mod metrics;
mod pattern;
mod registry;
mod template;
mod transform;
mod validator;

pub use catalog::{Catalog, CatalogTemplate};
pub use compose::compose;
pub use extract::extract;
pub use language::LanguageSet;
pub use matcher::{find_match, ScanCursor, ScanState, Step};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use pattern::{find_placeholders, Pattern, Placeholder, Segment, CLOSE_MARKER, OPEN_MARKER};
pub use registry::TemplateRegistry;
pub use template::{Template, TemplateHandle, Translation};
pub use transform::{Bindings, SynonymTable, ValueTransform};
pub use validator::{TranslationValidator, ValidationReport};
