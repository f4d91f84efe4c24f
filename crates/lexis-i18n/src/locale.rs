//! Locale identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// Language/region tag such as `"en-US"`.
///
/// Opaque and compared by exact string match. The only requirement is that
/// it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(String);

impl LocaleId {
    /// Create a locale id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, I18nError> {
        let id = id.into();
        if id.is_empty() {
            return Err(I18nError::InvalidLocale(id));
        }
        Ok(Self(id))
    }

    /// Get the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag (`"en"` for `"en-US"`).
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

/// `en-US`, the locale the bundled catalog is written in.
impl Default for LocaleId {
    fn default() -> Self {
        Self(crate::DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleId {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = I18nError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for LocaleId {
    type Error = I18nError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.0
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
