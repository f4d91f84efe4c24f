//! Example demonstrating catalog loading from a locale directory.

use std::path::PathBuf;

use lexis_i18n::{
    default_catalog, load_all, load_catalog, CatalogFormat, LoaderConfig, LocaleId, Resolver,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lexis i18n Message Loading Demo ===\n");

    let default = default_catalog()?;
    println!("Bundled en-US catalog ({} messages):", default.len());
    for key in default.keys() {
        println!("   {key}: {:?}", default.lookup(&key));
    }
    println!();

    let config = LoaderConfig {
        locale_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data/locales"),
        format: CatalogFormat::Json,
    };

    let es = load_catalog(&config, &LocaleId::new("es-ES")?)?;
    println!("es-ES app.tagline: {:?}", es.lookup("app.tagline"));

    let mut store = load_all(&config)?;
    store.register(LocaleId::default(), default);
    println!("Registered locales: {:?}", store.list_locales());

    let mut resolver = Resolver::new(store);
    resolver.configure(LocaleId::new("fr-FR")?, LocaleId::default());
    for key in ["app.name", "app.tagline", "status.paused", "status.unknown"] {
        println!("fr-FR {key}: {}", resolver.resolve(key));
    }
    Ok(())
}
