//! CLI error handling.

use std::process::ExitCode;

use lexis_i18n::{ConfigError, I18nError};
use thiserror::Error;

/// CLI error type with context for the user
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Catalog {
        message: String,
        #[source]
        source: I18nError,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Catalog { .. } => "E003",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
        }
    }

    /// Numeric process status for this error
    pub fn status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Catalog { .. } | Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("Registered locales are listed by `lexis locales`")
            }
            _ => None,
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation {
            message: format!("Invalid JSON: {err}"),
        }
    }
}

impl From<I18nError> for CliError {
    fn from(err: I18nError) -> Self {
        Self::Catalog {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check your lexis.yaml configuration file".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").status(), 5);
        assert_eq!(CliError::from(I18nError::InvalidLocale(String::new())).status(), 5);
        assert_eq!(CliError::config_with_hint("bad", "fix it").status(), 2);
    }

    #[test]
    fn test_codes_and_hints() {
        let err = CliError::not_found_with_suggestions("locale", "xx", vec!["en-US".into()]);
        assert_eq!(err.code(), "E005");
        assert_eq!(err.to_string(), "locale not found: xx");
        assert!(err.hint().is_some());

        let err = CliError::from(ConfigError::ValidationError {
            message: "locale_dir must not be empty".into(),
        });
        assert_eq!(err.code(), "E001");
        assert_eq!(err.hint(), Some("Check your lexis.yaml configuration file"));
    }
}
