//! Simple example demonstrating i18n usage.

use lexis_i18n::{detect_locale, t, I18n, I18nConfig, LocaleId, MessageCatalog};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lexis i18n Example ===");

    // Same setup as an application start: bundled en-US as current and fallback
    I18n::init(&I18nConfig::default())?;
    println!("Current locale: {}", I18n::locale());
    println!("Detected system locale: {}", detect_locale());

    println!("Translation: '{}'", t!("app.tagline"));
    println!("With template: '{}'", t!("user.greeting", name = "Ada"));
    println!("Missing key: '{}'", t!("missing.key"));

    I18n::subscribe(|previous, current| {
        println!("-- locale changed: {previous} -> {current}");
    });

    let mut es = MessageCatalog::new();
    es.insert("app.tagline", "Mensajes en su idioma");
    es.insert("user.greeting", "¡Hola, {name}!");
    let es_es = LocaleId::new("es-ES")?;
    I18n::register(es_es.clone(), es);
    I18n::set_locale(es_es);

    println!("Translation: '{}'", t!("app.tagline"));
    println!("With template: '{}'", t!("user.greeting", name = "María"));
    // Not translated in es-ES, served from en-US
    println!("Fallback: '{}'", t!("status.running"));

    println!("Available locales: {:?}", I18n::available_locales());
    Ok(())
}
