//! Output formatting utilities for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T: FormattedOutput>(ctx: &CommandContext, value: &T) -> Result<(), CliError> {
    write_output(ctx.output, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };

    writeln!(writer, "{output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        message: String,
    }

    impl FormattedOutput for Sample {
        fn format_text(&self) -> String {
            self.message.clone()
        }
    }

    #[test]
    fn test_write_text_and_json() {
        let sample = Sample {
            message: "Hello".to_string(),
        };

        let mut text = Vec::new();
        write_output(OutputFormat::Text, &sample, &mut text).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "Hello\n");

        let mut json = Vec::new();
        write_output(OutputFormat::Json, &sample, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["message"], "Hello");
    }
}
