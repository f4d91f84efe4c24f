//! Resolve command implementation.

use clap::Parser;
use serde::Serialize;

use super::parse_locale;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Resolve a message key
#[derive(Debug, Parser)]
pub struct ResolveCommand {
    /// Dotted message key, e.g. `greeting.hello`
    pub key: String,

    /// Locale to resolve in, instead of the configured one
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Fallback locale, instead of the configured one
    #[arg(short, long)]
    pub fallback: Option<String>,

    /// Placeholder value as NAME=VALUE (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,
}

/// Result of resolving one key.
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub key: String,
    pub locale: String,
    pub fallback_locale: String,
    /// Whether either catalog had the key; `false` means `text` is the key.
    pub found: bool,
    pub text: String,
}

impl FormattedOutput for ResolveOutput {
    fn format_text(&self) -> String {
        self.text.clone()
    }
}

impl ResolveCommand {
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<(), CliError> {
        let resolver = &mut ctx.resolver;
        if let Some(fallback) = &self.fallback {
            let current = match &self.locale {
                Some(locale) => parse_locale(locale)?,
                None => resolver.locale().clone(),
            };
            resolver.configure(current, parse_locale(fallback)?);
        } else if let Some(locale) = &self.locale {
            resolver.set_locale(parse_locale(locale)?);
        }

        let args: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let output = ResolveOutput {
            key: self.key.clone(),
            locale: resolver.locale().to_string(),
            fallback_locale: resolver.fallback_locale().to_string(),
            found: resolver.lookup(&self.key).is_some(),
            text: resolver.translate(&self.key, &args),
        };
        print_output(ctx, &output)
    }
}

/// Parse a `NAME=VALUE` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{s}`")),
    }
}
