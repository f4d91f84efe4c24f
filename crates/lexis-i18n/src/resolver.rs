//! Message resolution with a fallback locale.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::catalog::MessageCatalog;
use crate::locale::LocaleId;
use crate::store::CatalogStore;

/// Active locales and message options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Locale consulted first.
    pub locale: LocaleId,
    /// Locale consulted when the current one lacks a key.
    pub fallback_locale: LocaleId,
    /// Carried for hosts that render markup; the resolver never inspects it.
    pub warn_html_message: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            locale: LocaleId::default(),
            fallback_locale: LocaleId::default(),
            warn_html_message: false,
        }
    }
}

/// Callback run after the current locale changes, with `(previous, current)`.
pub type LocaleListener = Box<dyn Fn(&LocaleId, &LocaleId) + Send + Sync>;

/// Handle for removing a locale listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Turns message keys into display strings.
///
/// Lookup order is current locale, then fallback locale, then the key
/// itself. Missing translations never fail; they render as their key.
///
/// # Example
///
/// ```
/// use lexis_i18n::{CatalogStore, LocaleId, MessageCatalog, Resolver};
///
/// let en = LocaleId::new("en-US").unwrap();
/// let mut catalog = MessageCatalog::new();
/// catalog.insert("greeting.hello", "Hello");
///
/// let mut store = CatalogStore::new();
/// store.register(en.clone(), catalog);
///
/// let mut resolver = Resolver::new(store);
/// resolver.configure(en.clone(), en);
///
/// assert_eq!(resolver.resolve("greeting.hello"), "Hello");
/// assert_eq!(resolver.resolve("greeting.bye"), "greeting.bye");
///
/// resolver.set_locale(LocaleId::new("fr-FR").unwrap());
/// assert_eq!(resolver.resolve("greeting.hello"), "Hello");
/// ```
pub struct Resolver {
    store: CatalogStore,
    config: ResolverConfig,
    listeners: Vec<(SubscriptionId, LocaleListener)>,
    next_subscription: u64,
}

impl Resolver {
    /// Create a resolver over `store` with the default configuration.
    pub fn new(store: CatalogStore) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Create a resolver with an explicit configuration.
    pub fn with_config(store: CatalogStore, config: ResolverConfig) -> Self {
        let resolver = Self {
            store,
            config,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        // An empty store is still being filled in
        if !resolver.store.is_empty() {
            resolver.warn_unregistered();
        }
        resolver
    }

    /// Set the current and fallback locales.
    ///
    /// Neither needs a registered catalog yet.
    pub fn configure(&mut self, current: LocaleId, fallback: LocaleId) {
        debug!(%current, %fallback, "configured locales");
        self.config.locale = current;
        self.config.fallback_locale = fallback;
        self.warn_unregistered();
    }

    fn warn_unregistered(&self) {
        self.unregistered().into_iter().for_each(|locale| {
            warn!(%locale, "no catalog registered for configured locale");
        });
    }

    /// Configured locales without a catalog, each listed once.
    fn unregistered(&self) -> Vec<&LocaleId> {
        let mut missing: Vec<&LocaleId> = Vec::new();
        for locale in [&self.config.locale, &self.config.fallback_locale] {
            if !self.store.contains(locale.as_str()) && !missing.contains(&locale) {
                missing.push(locale);
            }
        }
        missing
    }

    /// Resolve `key` for the current locale.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or_else(|| {
            trace!(key, locale = %self.config.locale, "missing translation");
            key
        })
    }

    /// Like [`resolve`](Self::resolve), but `None` instead of the key on a miss.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.lookup_in(&self.config.locale, key)
            .or_else(|| self.lookup_in(&self.config.fallback_locale, key))
    }

    fn lookup_in(&self, locale: &LocaleId, key: &str) -> Option<&str> {
        self.store.get(locale.as_str())?.lookup(key)
    }

    /// Resolve `key` and substitute `{name}` placeholders from `args`.
    pub fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.resolve(key);
        if args.is_empty() {
            template.to_string()
        } else {
            interpolate(template, args)
        }
    }

    /// Switch the current locale; notifies listeners if it changed.
    pub fn set_locale(&mut self, locale: LocaleId) {
        if locale == self.config.locale {
            return;
        }
        let previous = std::mem::replace(&mut self.config.locale, locale);
        debug!(%previous, current = %self.config.locale, "locale changed");
        if !self.store.contains(self.config.locale.as_str()) {
            warn!(locale = %self.config.locale, "no catalog registered for configured locale");
        }
        for (_, listener) in &self.listeners {
            listener(&previous, &self.config.locale);
        }
    }

    /// Register a callback for locale changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&LocaleId, &LocaleId) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Insert or replace a catalog in the underlying store.
    pub fn register(&mut self, locale: LocaleId, catalog: MessageCatalog) {
        self.store.register(locale, catalog);
    }

    pub fn locale(&self) -> &LocaleId {
        &self.config.locale
    }

    pub fn fallback_locale(&self) -> &LocaleId {
        &self.config.fallback_locale
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CatalogStore {
        &mut self.store
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(CatalogStore::new())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Replace `{name}` tokens in one pass. Unknown names are left as-is.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        if name.contains('{') {
            out.push('{');
            rest = after;
            continue;
        }
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
