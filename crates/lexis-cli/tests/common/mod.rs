//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
    pub locales_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("lexis.yaml");
        let locales_dir = temp_dir.path().join("locales");
        std::fs::create_dir_all(&locales_dir).expect("Failed to create locales dir");

        Self {
            temp_dir,
            config_path,
            locales_dir,
        }
    }

    /// Write a config file
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// Write a locale file into the locales directory
    pub fn with_locale(self, file_name: &str, content: &str) -> Self {
        std::fs::write(self.locales_dir.join(file_name), content).expect("Failed to write locale");
        self
    }

    /// Config pointing at the locales directory, with a greeting catalog
    pub fn with_greetings(self) -> Self {
        self.with_config("locale: en-US\nfallback_locale: en-US\nlocale_dir: locales\n")
            .with_locale(
                "en-US.json",
                r#"{ "greeting": { "hello": "Hello", "welcome": "Welcome, {name}!" } }"#,
            )
            .with_locale(
                "fr-FR.json",
                r#"{ "greeting": { "hello": "Bonjour" } }"#,
            )
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this context
    ///
    /// `LEXIS_CONFIG` is only set once a config file has been written.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("lexis").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("LEXIS_CONFIG")
            .env_remove("LEXIS_LOCALES")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        if self.config_path.exists() {
            cmd.env("LEXIS_CONFIG", &self.config_path);
        }
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
