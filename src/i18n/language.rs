//! Language set: the fixed, ordered list of language codes.
//!
//! A code's position in the set is its identity for every later lookup:
//! translation slots on each template are indexed by it.

use crate::error::{LocalizeError, Result};

/// An ordered, immutable set of opaque language codes.
///
/// Codes are compared by exact equality only. The set is fixed at
/// construction and an index obtained from it stays valid for the
/// lifetime of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    /// Create a language set from codes in priority order.
    ///
    /// # Example
    /// ```
    /// use error_localizer::i18n::LanguageSet;
    ///
    /// let languages = LanguageSet::new(["English", "Norwegian Bokmål"]);
    /// assert_eq!(languages.index_of("Norwegian Bokmål").unwrap(), 1);
    /// ```
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up the index of a language code.
    ///
    /// # Returns
    /// * `Ok(index)` for the first code equal to `code`
    /// * `Err(LocalizeError::UnknownLanguage)` if the code is not in the set
    pub fn index_of(&self, code: &str) -> Result<usize> {
        self.codes
            .iter()
            .position(|candidate| candidate == code)
            .ok_or_else(|| LocalizeError::UnknownLanguage(code.to_string()))
    }

    /// Get the code stored at `index`.
    pub fn code(&self, index: usize) -> Option<&str> {
        self.codes.get(index).map(String::as_str)
    }

    /// Number of languages in the set.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over the codes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Codes that appear more than once (only the first occurrence is reachable).
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for (index, code) in self.codes.iter().enumerate() {
            if self.codes[..index].contains(code) && !seen.contains(&code.as_str()) {
                seen.push(code.as_str());
            }
        }
        seen
    }
}
