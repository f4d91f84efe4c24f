//! Locale → catalog registry.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::catalog::MessageCatalog;
use crate::error::Result;
use crate::locale::LocaleId;

/// Owns the message catalog of every registered locale.
///
/// Registration is last-write-wins. Lookups of unregistered locales return
/// `None`; absence is data, not an error.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalogs: HashMap<LocaleId, MessageCatalog>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the catalog for `locale`.
    pub fn register(&mut self, locale: LocaleId, catalog: MessageCatalog) {
        let messages = catalog.len();
        match self.catalogs.insert(locale.clone(), catalog) {
            Some(_) => debug!(%locale, messages, "replaced catalog"),
            None => debug!(%locale, messages, "registered catalog"),
        }
    }

    /// Validate an untyped document and register it.
    ///
    /// Fails with `InvalidCatalogShape` if any leaf is not a string; the
    /// store is left unchanged in that case.
    pub fn register_value(&mut self, locale: LocaleId, value: Value) -> Result<()> {
        let catalog = MessageCatalog::from_value(value)?;
        self.register(locale, catalog);
        Ok(())
    }

    /// Get the catalog registered for `locale`.
    pub fn get(&self, locale: &str) -> Option<&MessageCatalog> {
        self.catalogs.get(locale)
    }

    /// Remove a locale, returning its catalog.
    pub fn remove(&mut self, locale: &str) -> Option<MessageCatalog> {
        self.catalogs.remove(locale)
    }

    /// Currently registered locales.
    pub fn list_locales(&self) -> BTreeSet<LocaleId> {
        self.catalogs.keys().cloned().collect()
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.catalogs.contains_key(locale)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nError;
    use proptest::prelude::*;
    use serde_json::json;

    fn locale(id: &str) -> LocaleId {
        LocaleId::new(id).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut store = CatalogStore::new();
        assert!(store.get("en-US").is_none());
        assert!(store.is_empty());

        let mut catalog = MessageCatalog::new();
        catalog.insert("greeting.hello", "Hello");
        store.register(locale("en-US"), catalog.clone());

        assert_eq!(store.get("en-US"), Some(&catalog));
        assert!(store.contains("en-US"));
        assert!(!store.contains("en-us"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_locales() {
        let mut store = CatalogStore::new();
        store.register(locale("fr-FR"), MessageCatalog::new());
        store.register(locale("en-US"), MessageCatalog::new());
        store.register(locale("en-US"), MessageCatalog::new());

        let locales: Vec<_> = store.list_locales().into_iter().map(String::from).collect();
        assert_eq!(locales, vec!["en-US", "fr-FR"]);
    }

    #[test]
    fn test_register_value_rejects_garbage() {
        let mut store = CatalogStore::new();
        store
            .register_value(locale("en-US"), json!({ "greeting": { "hello": "Hello" } }))
            .unwrap();

        let err = store
            .register_value(locale("en-US"), json!({ "greeting": { "count": 2 } }))
            .unwrap_err();
        assert!(matches!(err, I18nError::InvalidCatalogShape { .. }));

        // Failed registration leaves the previous catalog in place
        assert_eq!(store.get("en-US").unwrap().lookup("greeting.hello"), Some("Hello"));
    }

    #[test]
    fn test_remove() {
        let mut store = CatalogStore::new();
        store.register(locale("de-DE"), MessageCatalog::new());
        assert!(store.remove("de-DE").is_some());
        assert!(store.remove("de-DE").is_none());
        assert!(store.list_locales().is_empty());
    }

    proptest! {
        #[test]
        fn prop_last_write_wins(values in proptest::collection::vec("[a-z ]{0,12}", 1..8)) {
            let mut store = CatalogStore::new();
            for value in &values {
                let mut catalog = MessageCatalog::new();
                catalog.insert("message", value.clone());
                store.register(locale("en-US"), catalog);
            }
            let last = values.last().unwrap();
            prop_assert_eq!(store.get("en-US").unwrap().lookup("message"), Some(last.as_str()));
            prop_assert_eq!(store.len(), 1);
        }
    }
}
