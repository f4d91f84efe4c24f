//! Message catalog loading.
//!
//! Locale files live in one directory, one file per locale, named after the
//! locale id: `locales/en-US.json`, `locales/fr-FR.yaml`, ...

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::MessageCatalog;
use crate::error::{I18nError, Result};
use crate::locale::LocaleId;
use crate::store::CatalogStore;

/// Bundled `en-US` messages.
const DEFAULT_MESSAGES: &str = include_str!("../locales/en-US.json");

/// Catalog loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory containing locale files.
    pub locale_dir: PathBuf,
    /// File format to load.
    pub format: CatalogFormat,
}

/// Catalog file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    #[default]
    Json,
    Yaml,
}

impl CatalogFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    fn matches(self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        match self {
            Self::Json => ext.eq_ignore_ascii_case("json"),
            Self::Yaml => ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            locale_dir: PathBuf::from("locales"),
            format: CatalogFormat::Json,
        }
    }
}

impl LoaderConfig {
    /// Path of the file holding `locale`.
    pub fn path_for(&self, locale: &LocaleId) -> PathBuf {
        self.locale_dir
            .join(format!("{}.{}", locale, self.format.extension()))
    }
}

/// Load a catalog for a locale.
///
/// A missing file yields an empty catalog.
pub fn load_catalog(config: &LoaderConfig, locale: &LocaleId) -> Result<MessageCatalog> {
    let path = config.path_for(locale);
    if !path.exists() {
        debug!(path = %path.display(), "no catalog file, using empty catalog");
        return Ok(MessageCatalog::new());
    }
    load_file(&path, config.format)
}

/// Load one catalog file.
pub fn load_file(path: &Path, format: CatalogFormat) -> Result<MessageCatalog> {
    let content = fs::read_to_string(path).map_err(|e| I18nError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let catalog = parse_catalog(&content, format).map_err(|e| match e {
        I18nError::ParseError { message, .. } => I18nError::ParseError {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;
    debug!(path = %path.display(), messages = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Parse catalog text in the given format.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<MessageCatalog> {
    let parse_error = |message: String| I18nError::ParseError {
        path: PathBuf::new(),
        message,
    };
    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        CatalogFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };
    MessageCatalog::from_value(value)
}

/// Register every locale file in `config.locale_dir` into `store`.
///
/// Files are registered in name order; a file replaces any catalog already
/// registered under its locale. Every file is parsed before any is
/// registered, so on error `store` is left untouched. A missing directory
/// registers nothing. Returns the number of catalogs registered.
pub fn load_into(config: &LoaderConfig, store: &mut CatalogStore) -> Result<usize> {
    let dir = &config.locale_dir;
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "locale directory not found");
        return Ok(0);
    }

    let entries = fs::read_dir(dir).map_err(|e| I18nError::LoadError {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && config.format.matches(path))
        .collect();
    paths.sort();

    let mut staged = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        let Ok(locale) = LocaleId::new(stem) else {
            warn!(path = %path.display(), "skipping file without a locale name");
            continue;
        };
        staged.push((locale, load_file(&path, config.format)?));
    }

    let loaded = staged.len();
    for (locale, catalog) in staged {
        store.register(locale, catalog);
    }
    Ok(loaded)
}

/// Load every locale file in `config.locale_dir` into a new store.
pub fn load_all(config: &LoaderConfig) -> Result<CatalogStore> {
    let mut store = CatalogStore::new();
    load_into(config, &mut store)?;
    Ok(store)
}

/// Embedded default messages (`en-US`).
pub fn default_catalog() -> Result<MessageCatalog> {
    parse_catalog(DEFAULT_MESSAGES, CatalogFormat::Json)
}
