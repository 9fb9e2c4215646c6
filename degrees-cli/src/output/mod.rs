//! Output formatting for the degrees CLI.
//!
//! Provides unified output across all commands with three formats:
//! table (human-readable, colored), json (machine-readable), and csv.

use clap::ValueEnum;
use serde::Serialize;
use std::str::FromStr;

mod csv;
mod json;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// CSV format for spreadsheet/data processing
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Types that can be rendered for human-readable output. JSON and CSV
/// renderings are derived from the `Serialize` impl.
pub trait TableDisplay: Serialize {
    /// Convert to table format string
    fn to_table(&self) -> String;
}

/// Result wrapper with automatic format selection.
pub struct Output<T> {
    data: T,
    format: OutputFormat,
}

impl<T: TableDisplay> Output<T> {
    pub fn new(data: T, format: OutputFormat) -> Self {
        Self { data, format }
    }

    /// Render the output to stdout.
    pub fn render(&self) -> anyhow::Result<()> {
        println!("{}", self.render_to_string());
        Ok(())
    }

    /// Get the rendered string without printing.
    pub fn render_to_string(&self) -> String {
        match self.format {
            OutputFormat::Table => self.data.to_table(),
            OutputFormat::Json => JsonOutput::format(&self.data),
            OutputFormat::Csv => CsvOutput::format(&self.data),
        }
    }
}
