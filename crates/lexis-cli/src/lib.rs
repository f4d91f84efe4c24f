//! Lexis CLI Library
//!
//! Command-line diagnostics for message catalogs: resolve keys, list
//! registered locales and find untranslated messages.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
