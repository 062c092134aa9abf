use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub catalog_path: PathBuf,

    // Resolution
    pub default_language: Option<String>,
    pub fallback_to_raw: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Catalog - JSON file with languages, templates and synonyms
            catalog_path: std::env::var("ERROR_CATALOG_PATH")
                .map(PathBuf::from)
                .context("ERROR_CATALOG_PATH not set")?,

            // Resolution - language defaults to the catalog's first language
            default_language: std::env::var("ERROR_LANGUAGE")
                .ok()
                .filter(|v| !v.is_empty()),
            fallback_to_raw: std::env::var("ERROR_FALLBACK_TO_RAW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        })
    }
}
