//! Error types for catalog registration and loading.
//!
//! Missing translations are never errors; these cover caller bugs
//! (bad locale ids, malformed catalogs) and unreadable locale files.

use std::path::PathBuf;

use thiserror::Error;

/// i18n errors.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("invalid locale: {0:?}")]
    InvalidLocale(String),

    /// A catalog leaf was neither a string nor a nested mapping.
    #[error("invalid catalog shape at '{path}': expected string or object, found {found}")]
    InvalidCatalogShape { path: String, found: &'static str },

    #[error("failed to load catalog {}: {message}", path.display())]
    LoadError { path: PathBuf, message: String },

    #[error("failed to parse catalog {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },
}

impl I18nError {
    pub(crate) fn shape(path: impl Into<String>, found: &'static str) -> Self {
        Self::InvalidCatalogShape {
            path: path.into(),
            found,
        }
    }
}

/// Result type alias using [`I18nError`].
pub type Result<T> = std::result::Result<T, I18nError>;
