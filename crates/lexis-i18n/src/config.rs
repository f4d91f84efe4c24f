//! Startup configuration for the i18n subsystem.
//!
//! Read from a YAML file such as:
//!
//! ```yaml
//! locale: en-US
//! fallback_locale: en-US
//! warn_html_message: false
//! locale_dir: ${APP_LOCALES:-locales}
//! format: json
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::detect::detect_from_env;
use crate::loader::{default_catalog, load_into, CatalogFormat, LoaderConfig};
use crate::locale::LocaleId;
use crate::resolver::{Resolver, ResolverConfig};
use crate::store::CatalogStore;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// i18n configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Initial locale.
    pub locale: LocaleId,
    /// Locale consulted when the current one lacks a key.
    pub fallback_locale: LocaleId,
    /// Passed through to [`ResolverConfig`].
    pub warn_html_message: bool,
    /// Take the initial locale from the environment when one is set.
    pub detect_locale: bool,
    /// Directory of locale files; only the bundled catalog is used if unset.
    pub locale_dir: Option<PathBuf>,
    /// Format of the files in `locale_dir`.
    pub format: CatalogFormat,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: LocaleId::default(),
            fallback_locale: LocaleId::default(),
            warn_html_message: false,
            detect_locale: false,
            locale_dir: None,
            format: CatalogFormat::default(),
        }
    }
}

impl I18nConfig {
    /// Resolver settings, applying locale detection if enabled.
    pub fn resolver_config(&self) -> ResolverConfig {
        let locale = if self.detect_locale {
            detect_from_env().unwrap_or_else(|| self.locale.clone())
        } else {
            self.locale.clone()
        };
        ResolverConfig {
            locale,
            fallback_locale: self.fallback_locale.clone(),
            warn_html_message: self.warn_html_message,
        }
    }

    /// Loader settings, if a locale directory is configured.
    pub fn loader_config(&self) -> Option<LoaderConfig> {
        self.locale_dir.as_ref().map(|dir| LoaderConfig {
            locale_dir: dir.clone(),
            format: self.format,
        })
    }

    /// Build a resolver from this configuration.
    ///
    /// The bundled `en-US` catalog is registered first; catalogs found in
    /// `locale_dir` are registered after it and may replace it.
    pub fn build_resolver(&self) -> crate::Result<Resolver> {
        let mut store = CatalogStore::new();
        store.register(LocaleId::default(), default_catalog()?);
        if let Some(loader) = self.loader_config() {
            load_into(&loader, &mut store)?;
        }
        Ok(Resolver::with_config(store, self.resolver_config()))
    }
}

/// Configuration loader.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given config file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the configuration. A missing file yields the defaults.
    ///
    /// A relative `locale_dir` is taken relative to the config file.
    pub fn load(&self) -> Result<I18nConfig, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(I18nConfig::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let mut config = Self::parse(&contents)?;

        if let (Some(dir), Some(base)) = (config.locale_dir.as_mut(), self.path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }

        debug!(path = %self.path.display(), locale = %config.locale, "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<I18nConfig, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        if expanded.trim().is_empty() {
            return Ok(I18nConfig::default());
        }

        let config: I18nConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        validate(&config)?;
        Ok(config)
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
        ConfigError::ValidationError {
            message: e.to_string(),
        }
    })?;

    let mut result = String::with_capacity(content.len());
    let mut last = 0;
    for cap in re.captures_iter(content) {
        let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let value = match std::env::var(name.as_str()) {
            Ok(v) => v,
            Err(_) => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: name.as_str().to_string(),
                    })
                }
            },
        };
        result.push_str(&content[last..full.start()]);
        result.push_str(&value);
        last = full.end();
    }
    result.push_str(&content[last..]);
    Ok(result)
}

/// Validate configuration values.
fn validate(config: &I18nConfig) -> Result<(), ConfigError> {
    if let Some(dir) = &config.locale_dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "locale_dir must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = I18nConfig::default();
        assert_eq!(config.locale.as_str(), "en-US");
        assert_eq!(config.fallback_locale.as_str(), "en-US");
        assert!(!config.warn_html_message);
        assert!(!config.detect_locale);
        assert!(config.loader_config().is_none());
    }

    #[test]
    fn test_partial_config_merges_with_defaults() {
        let config = ConfigLoader::parse("locale: fr-FR\nformat: yaml\n").unwrap();
        assert_eq!(config.locale.as_str(), "fr-FR");
        assert_eq!(config.fallback_locale.as_str(), "en-US");
        assert_eq!(config.format, CatalogFormat::Yaml);
    }

    #[test]
    fn test_empty_locale_rejected() {
        let err = ConfigLoader::parse("locale: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_empty_locale_dir_rejected() {
        let err = ConfigLoader::parse("locale_dir: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_resolver_config() {
        let config = ConfigLoader::parse(
            "locale: de-DE\nfallback_locale: en-GB\nwarn_html_message: true\n",
        )
        .unwrap();
        let resolver = config.resolver_config();
        assert_eq!(resolver.locale.as_str(), "de-DE");
        assert_eq!(resolver.fallback_locale.as_str(), "en-GB");
        assert!(resolver.warn_html_message);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("LEXIS_TEST_LOCALE_DIR", "/srv/locales");
        let config = ConfigLoader::parse("locale_dir: ${LEXIS_TEST_LOCALE_DIR}\n").unwrap();
        assert_eq!(config.locale_dir, Some(PathBuf::from("/srv/locales")));
        std::env::remove_var("LEXIS_TEST_LOCALE_DIR");

        let config =
            ConfigLoader::parse("locale_dir: ${LEXIS_TEST_UNSET_DIR:-translations}\n").unwrap();
        assert_eq!(config.locale_dir, Some(PathBuf::from("translations")));

        let err = ConfigLoader::parse("locale: ${LEXIS_TEST_UNSET_LOCALE}\n").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { var } if var == "LEXIS_TEST_UNSET_LOCALE"));
    }

    #[test]
    fn test_build_resolver() {
        let config = I18nConfig {
            locale: LocaleId::new("fr-FR").unwrap(),
            locale_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data/locales")),
            ..I18nConfig::default()
        };
        let resolver = config.build_resolver().unwrap();
        assert_eq!(resolver.store().len(), 3);
        assert_eq!(resolver.resolve("app.tagline"), "Des messages dans votre langue");
        // Missing in fr-FR, served by the bundled en-US catalog
        assert_eq!(resolver.resolve("status.paused"), "Paused");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConfigLoader::new("/nonexistent/lexis.yaml").load().unwrap();
        assert_eq!(config, I18nConfig::default());
    }

    #[test]
    fn test_load_resolves_relative_locale_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexis.yaml");
        std::fs::write(&path, "locale: es-ES\nlocale_dir: locales\n").unwrap();

        let config = ConfigLoader::new(&path).load().unwrap();
        assert_eq!(config.locale.as_str(), "es-ES");
        assert_eq!(config.locale_dir, Some(dir.path().join("locales")));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = ConfigLoader::parse("locale: en-US\nformat: [json\n").unwrap_err();
        match err {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
