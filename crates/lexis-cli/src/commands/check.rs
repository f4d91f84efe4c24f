//! Check command implementation.
//!
//! Compares every locale with the fallback locale: keys the fallback has
//! and a locale lacks are missing translations; keys only the locale has
//! are extra and never shown to users through the fallback.

use clap::Parser;
use lexis_i18n::{LocaleId, MessageCatalog};
use serde::Serialize;
use tracing::info;

use super::parse_locale;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Report untranslated keys
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Check only this locale
    #[arg(short, long)]
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocaleReport {
    pub locale: String,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub reference: String,
    pub reports: Vec<LocaleReport>,
}

impl CheckOutput {
    pub fn missing_count(&self) -> usize {
        self.reports.iter().map(|r| r.missing.len()).sum()
    }
}

impl FormattedOutput for CheckOutput {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();
        for report in &self.reports {
            if report.missing.is_empty() {
                lines.push(format!("{}: complete", report.locale));
            } else {
                lines.push(format!("{}: {} missing", report.locale, report.missing.len()));
                lines.extend(report.missing.iter().map(|key| format!("  - {key}")));
            }
            lines.extend(report.extra.iter().map(|key| format!("  + {key}")));
        }
        if lines.is_empty() {
            lines.push(format!("no locales to compare with {}", self.reference));
        }
        lines.join("\n")
    }
}

fn compare(locale: &LocaleId, reference: &MessageCatalog, catalog: &MessageCatalog) -> LocaleReport {
    let missing = reference
        .keys()
        .into_iter()
        .filter(|key| catalog.lookup(key).is_none())
        .collect();
    let extra = catalog
        .keys()
        .into_iter()
        .filter(|key| reference.lookup(key).is_none())
        .collect();
    LocaleReport {
        locale: locale.to_string(),
        missing,
        extra,
    }
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let output = self.run(ctx)?;
        print_output(ctx, &output)?;

        let missing = output.missing_count();
        if missing > 0 {
            return Err(CliError::validation(format!(
                "{missing} missing translation(s) relative to {}",
                output.reference
            )));
        }
        Ok(())
    }

    /// Build the report without printing it.
    pub fn run(&self, ctx: &CommandContext) -> Result<CheckOutput, CliError> {
        let store = ctx.resolver.store();
        let registered = || store.list_locales().into_iter().map(String::from).collect();

        let reference_locale = ctx.resolver.fallback_locale();
        let reference = store.get(reference_locale.as_str()).ok_or_else(|| {
            CliError::not_found_with_suggestions("locale", reference_locale.as_str(), registered())
        })?;

        let targets: Vec<LocaleId> = match &self.locale {
            Some(locale) => {
                let locale = parse_locale(locale)?;
                if !store.contains(locale.as_str()) {
                    return Err(CliError::not_found_with_suggestions(
                        "locale",
                        locale.as_str(),
                        registered(),
                    ));
                }
                vec![locale]
            }
            None => store
                .list_locales()
                .into_iter()
                .filter(|locale| locale != reference_locale)
                .collect(),
        };

        let reports = targets
            .iter()
            .filter_map(|locale| {
                let catalog = store.get(locale.as_str())?;
                let report = compare(locale, reference, catalog);
                info!(
                    locale = %locale,
                    missing = report.missing.len(),
                    extra = report.extra.len(),
                    "checked locale"
                );
                Some(report)
            })
            .collect();

        Ok(CheckOutput {
            reference: reference_locale.to_string(),
            reports,
        })
    }
}
