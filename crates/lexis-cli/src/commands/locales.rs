//! Locales command implementation.

use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// List registered locales
#[derive(Debug, Parser)]
pub struct LocalesCommand {}

#[derive(Debug, Serialize)]
pub struct LocaleEntry {
    pub locale: String,
    pub messages: usize,
    pub current: bool,
    pub fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct LocalesOutput {
    pub locales: Vec<LocaleEntry>,
}

impl FormattedOutput for LocalesOutput {
    fn format_text(&self) -> String {
        self.locales
            .iter()
            .map(|entry| entry.locale.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LocalesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let resolver = &ctx.resolver;
        let store = resolver.store();
        let locales = store
            .list_locales()
            .into_iter()
            .map(|locale| LocaleEntry {
                messages: store.get(locale.as_str()).map_or(0, |c| c.len()),
                current: &locale == resolver.locale(),
                fallback: &locale == resolver.fallback_locale(),
                locale: locale.into(),
            })
            .collect();
        print_output(ctx, &LocalesOutput { locales })
    }
}
