//! Process-wide i18n instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::catalog::MessageCatalog;
use crate::config::I18nConfig;
use crate::error::Result;
use crate::locale::LocaleId;
use crate::resolver::{Resolver, SubscriptionId};

type SharedListener = Arc<dyn Fn(&LocaleId, &LocaleId) + Send + Sync>;

/// Global i18n state.
static I18N: RwLock<Option<Resolver>> = RwLock::new(None);

/// Locale listeners, kept apart from `I18N` so callbacks can translate.
static LISTENERS: Mutex<Vec<(SubscriptionId, SharedListener)>> = Mutex::new(Vec::new());

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(0);

fn read() -> RwLockReadGuard<'static, Option<Resolver>> {
    I18N.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Option<Resolver>> {
    I18N.write().unwrap_or_else(PoisonError::into_inner)
}

fn listeners() -> MutexGuard<'static, Vec<(SubscriptionId, SharedListener)>> {
    LISTENERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// i18n manager.
///
/// Thin static facade over a single [`Resolver`] guarded by one lock.
/// Listeners run after that lock is released, so they may call back into
/// `I18n` or `t!`.
pub struct I18n;

impl I18n {
    /// Initialize global i18n from a configuration.
    ///
    /// The bundled `en-US` catalog is registered first; catalogs found in
    /// `config.locale_dir` are registered after it and may replace it.
    pub fn init(config: &I18nConfig) -> Result<()> {
        Self::install(config.build_resolver()?);
        Ok(())
    }

    /// Replace the global resolver.
    pub fn install(resolver: Resolver) {
        *write() = Some(resolver);
    }

    /// Whether `init` or `install` has run.
    pub fn is_initialized() -> bool {
        read().is_some()
    }

    /// Add or replace a catalog for a locale.
    pub fn register(locale: LocaleId, catalog: MessageCatalog) {
        match write().as_mut() {
            Some(resolver) => resolver.register(locale, catalog),
            None => warn!(%locale, "i18n not initialized, catalog dropped"),
        }
    }

    /// Set the current locale.
    ///
    /// Listeners are notified once the new locale is visible, and only if it
    /// changed.
    pub fn set_locale(locale: LocaleId) {
        let previous = {
            let mut guard = write();
            let Some(resolver) = guard.as_mut() else {
                warn!(%locale, "i18n not initialized, locale not set");
                return;
            };
            let previous = resolver.locale().clone();
            resolver.set_locale(locale.clone());
            previous
        };
        if previous == locale {
            return;
        }
        let current: Vec<SharedListener> = listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in current {
            listener(&previous, &locale);
        }
    }

    /// Get the current locale.
    pub fn locale() -> LocaleId {
        read()
            .as_ref()
            .map(|resolver| resolver.locale().clone())
            .unwrap_or_default()
    }

    /// Registered locales, empty before initialization.
    pub fn available_locales() -> Vec<LocaleId> {
        read()
            .as_ref()
            .map(|resolver| resolver.store().list_locales().into_iter().collect())
            .unwrap_or_default()
    }

    /// Listen for locale changes made through [`I18n::set_locale`].
    pub fn subscribe<F>(listener: F) -> SubscriptionId
    where
        F: Fn(&LocaleId, &LocaleId) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed));
        listeners().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(id: SubscriptionId) -> bool {
        let mut listeners = listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Translate a message, substituting `{name}` placeholders.
    ///
    /// Before initialization the key is returned unchanged.
    pub fn translate(key: &str, args: &[(&str, &str)]) -> String {
        match read().as_ref() {
            Some(resolver) => resolver.translate(key, args),
            None => key.to_string(),
        }
    }
}

/// Translation macro.
///
/// `t!("app.title")` or `t!("user.greeting", name = user)`; values are
/// formatted with `Display`.
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::I18n::translate($key, &[])
    };
    ($key:expr, $($name:ident = $value:expr),+ $(,)?) => {{
        let values = [$(::std::string::ToString::to_string(&$value)),+];
        let names = [$(stringify!($name)),+];
        let args: ::std::vec::Vec<(&str, &str)> = names
            .iter()
            .copied()
            .zip(values.iter().map(::std::string::String::as_str))
            .collect();
        $crate::I18n::translate($key, &args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    // The global is shared by every test in this module.
    static GUARD: Mutex<()> = Mutex::new(());

    fn locale(id: &str) -> LocaleId {
        LocaleId::new(id).unwrap()
    }

    #[test]
    fn test_init_registers_bundled_catalog() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        I18n::init(&I18nConfig::default()).unwrap();

        assert!(I18n::is_initialized());
        assert_eq!(I18n::locale().as_str(), "en-US");
        assert_eq!(I18n::available_locales(), vec![locale("en-US")]);
        assert_eq!(t!("app.name"), "Lexis");
        assert_eq!(t!("unknown.key"), "unknown.key");
    }

    #[test]
    fn test_locale_switch_and_fallback() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        I18n::init(&I18nConfig::default()).unwrap();

        let mut es = MessageCatalog::new();
        es.insert("app.tagline", "Mensajes en su idioma");
        es.insert("user.greeting", "¡Hola, {name}!");
        I18n::register(locale("es-ES"), es);

        I18n::set_locale(locale("es-ES"));
        assert_eq!(I18n::locale().as_str(), "es-ES");
        assert_eq!(t!("app.tagline"), "Mensajes en su idioma");
        assert_eq!(t!("user.greeting", name = "María"), "¡Hola, María!");
        // Missing in es-ES, present in the bundled en-US catalog
        assert_eq!(t!("app.name"), "Lexis");

        I18n::set_locale(locale("en-US"));
        assert_eq!(t!("user.greeting", name = "Ada"), "Hello, Ada!");
    }

    #[test]
    fn test_subscribe_through_global() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        I18n::init(&I18nConfig::default()).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = I18n::subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        I18n::set_locale(locale("fr-FR"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(I18n::unsubscribe(id));
        I18n::set_locale(locale("en-US"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_macro_formats_display_values() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        I18n::init(&I18nConfig::default()).unwrap();

        assert_eq!(
            t!("User {id} has {count} messages", id = 123, count = 5),
            "User 123 has 5 messages"
        );
    }

    #[test]
    fn test_listener_can_translate() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        I18n::init(&I18nConfig::default()).unwrap();

        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&seen);
            let id = I18n::subscribe(move |_, current| {
                let text = t!("locale.changed", locale = current);
                sink.lock().unwrap().push((text, I18n::locale()));
            });
            I18n::set_locale(locale("fr-FR"));
            I18n::unsubscribe(id);
            I18n::set_locale(locale("en-US"));
            let seen = seen.lock().unwrap().clone();
            tx.send(seen).unwrap();
        });

        let seen = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("set_locale did not return while a listener translated");
        worker.join().unwrap();
        assert_eq!(seen.len(), 1);
        // fr-FR has no catalog, so the bundled en-US text is used
        assert!(seen[0].0.contains("fr-FR"));
        assert_eq!(seen[0].1.as_str(), "fr-FR");
    }

    #[test]
    fn test_uninitialized_translate_returns_key() {
        let _guard = GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        *write() = None;

        assert!(!I18n::is_initialized());
        assert_eq!(t!("user.greeting", name = "Ada"), "user.greeting");
        assert_eq!(I18n::translate("{name}", &[("name", "Ada")]), "{name}");

        // Dropped with a warning, never a panic
        I18n::register(locale("es-ES"), MessageCatalog::new());
        I18n::set_locale(locale("es-ES"));
        assert!(!I18n::is_initialized());
        assert_eq!(I18n::locale().as_str(), "en-US");
    }
}
