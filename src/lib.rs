//! Localize machine-generated error text.
//!
//! Register templates for the error strings a subsystem produces, attach a
//! rendering per language, and resolve raw error text into a readable
//! message in the caller's language. See [`i18n`] for the engine.

pub mod config;
pub mod error;
pub mod i18n;

pub use error::{LocalizeError, Result};
pub use i18n::{Catalog, TemplateHandle, TemplateRegistry};
