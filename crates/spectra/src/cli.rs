//! Command line.

use std::path::PathBuf;

use clap::Parser;
use spectra_core::Language;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "spectra.toml";

/// Full-screen display stress test with live diagnostics.
#[derive(Parser, Debug)]
#[command(name = "spectra", author, version, about)]
pub struct Cli {
    /// TOML settings file; skipped when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Run in a window instead of full screen
    #[arg(long)]
    pub windowed: bool,

    /// Log filter, e.g. `debug` or `spectra=trace` (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Overlay language: zh or en
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::from_code(value).ok_or_else(|| format!("unknown language '{value}', expected zh or en"))
}
