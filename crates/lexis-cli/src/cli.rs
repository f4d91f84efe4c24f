//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use lexis_i18n::{CatalogFormat, ConfigLoader, I18nConfig, Resolver};
use tracing::debug;

use crate::commands::{CheckCommand, LocalesCommand, ResolveCommand};
use crate::error::CliError;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lexis.yaml";

/// Lexis - message catalog diagnostics
///
/// Resolve message keys, list locales and find missing translations.
#[derive(Debug, Parser)]
#[command(
    name = "lexis",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "LEXIS_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Directory of locale files, overrides `locale_dir`
    #[arg(
        short = 'L',
        long,
        global = true,
        env = "LEXIS_LOCALES",
        value_hint = ValueHint::DirPath
    )]
    pub locales: Option<PathBuf>,

    /// Locale file format, overrides `format`
    #[arg(long, global = true, value_enum)]
    pub catalog_format: Option<FormatArg>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Locale file format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for CatalogFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => CatalogFormat::Json,
            FormatArg::Yaml => CatalogFormat::Yaml,
        }
    }
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a message key
    Resolve(ResolveCommand),

    /// List registered locales
    #[command(visible_alias = "ls")]
    Locales(LocalesCommand),

    /// Report keys missing from locales relative to the fallback locale
    Check(CheckCommand),
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<I18nConfig, CliError> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if self.config.is_some() && !path.exists() {
            return Err(CliError::config_with_hint(
                format!("config file not found: {}", path.display()),
                "Pass an existing file with --config or unset LEXIS_CONFIG",
            ));
        }

        let mut config = ConfigLoader::new(&path).load()?;
        if let Some(dir) = &self.locales {
            config.locale_dir = Some(dir.clone());
        }
        if let Some(format) = self.catalog_format {
            config.format = format.into();
        }
        debug!(?config, "effective configuration");
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self) -> Result<(), CliError> {
        let config = self.load_config()?;
        let resolver = config.build_resolver()?;
        let mut ctx = CommandContext {
            resolver,
            output: self.output,
            verbose: self.verbose,
        };

        match &self.command {
            Command::Resolve(cmd) => cmd.execute(&mut ctx),
            Command::Locales(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub resolver: Resolver,
    pub output: OutputFormat,
    pub verbose: u8,
}
