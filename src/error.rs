use thiserror::Error;

/// Errors returned while registering templates or resolving error text.
#[derive(Debug, Error)]
pub enum LocalizeError {
    /// The language code is not part of the configured language set.
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// No registered pattern matches the text.
    #[error("no matching error template found")]
    NoMatchingTemplate,

    /// The matched template has no translation for the requested language.
    #[error("template {template} has no translation for '{language}'")]
    MissingTranslation { template: usize, language: String },

    /// The handle does not refer to a template in this registry.
    #[error("unknown template handle: {0}")]
    UnknownTemplate(usize),

    /// The catalog could not be parsed.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// I/O error while reading a catalog.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocalizeError>;
