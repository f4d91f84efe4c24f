//! Automatic locale detection.

use std::env;

use crate::locale::LocaleId;

/// Environment variables consulted, highest priority first.
pub const LOCALE_ENV_VARS: [&str; 4] = ["LEXIS_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Detect the system locale with optional user override.
pub fn detect_locale_with_override(user_locale: Option<&str>) -> LocaleId {
    // User preference has highest priority
    if let Some(locale) = user_locale.and_then(normalize) {
        return locale;
    }

    detect_locale()
}

/// Detect the system locale, defaulting to `en-US`.
pub fn detect_locale() -> LocaleId {
    detect_from_env().unwrap_or_default()
}

/// First usable locale from the environment, if any.
pub fn detect_from_env() -> Option<LocaleId> {
    LOCALE_ENV_VARS.iter().find_map(|var| from_env(var))
}

/// Parse locale from environment variable.
fn from_env(var: &str) -> Option<LocaleId> {
    env::var(var).ok().and_then(|v| normalize(&v))
}

/// Turn a POSIX locale value into a tag.
///
/// `en_US.UTF-8` becomes `en-US` and `de_DE@euro` becomes `de-DE`. Only the
/// first entry of a colon-separated list is used. `C`, `POSIX` and empty
/// values carry no language and yield `None`.
pub fn normalize(value: &str) -> Option<LocaleId> {
    let value = value.split(':').next().unwrap_or_default().trim();
    let value = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");

    if value.is_empty() || value == "C" || value == "POSIX" {
        return None;
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    LocaleId::new(value).ok()
}
