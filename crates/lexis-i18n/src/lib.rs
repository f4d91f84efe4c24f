//! Locale catalog registry and message resolver.
//!
//! A [`CatalogStore`] owns one nested [`MessageCatalog`] per locale. A
//! [`Resolver`] turns dotted keys into display strings for its current
//! locale, consulting a fallback locale and finally returning the key
//! itself, so a missing translation is visible but never fatal.
//!
//! [`I18n`] and [`t!`] expose a process-wide resolver for application code.

pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod global;
pub mod loader;
pub mod locale;
pub mod resolver;
pub mod store;

/// Locale of the bundled catalog and of every default.
pub const DEFAULT_LOCALE: &str = "en-US";

pub use catalog::{MessageCatalog, MessageNode};
pub use config::{ConfigError, ConfigLoader, I18nConfig};
pub use detect::{detect_locale, detect_locale_with_override};
pub use error::{I18nError, Result};
pub use global::I18n;
pub use loader::{
    default_catalog, load_all, load_catalog, load_into, CatalogFormat, LoaderConfig,
};
pub use locale::LocaleId;
pub use resolver::{interpolate, LocaleListener, Resolver, ResolverConfig, SubscriptionId};
pub use store::CatalogStore;
