//! Command implementations.

mod check;
mod locales;
mod resolve;

pub use check::{CheckCommand, CheckOutput, LocaleReport};
pub use locales::{LocaleEntry, LocalesCommand, LocalesOutput};
pub use resolve::{ResolveCommand, ResolveOutput};

use lexis_i18n::LocaleId;

use crate::error::CliError;

/// Parse a locale argument, reporting empty values as a validation error.
fn parse_locale(value: &str) -> Result<LocaleId, CliError> {
    LocaleId::new(value).map_err(|e| CliError::validation(e.to_string()))
}
