#![warn(missing_docs)]
//! Perftester Report - Tables and Output
//!
//! Presentation layer shared by the statistics printer and the interactive
//! selector:
//! - Column-aligned text tables with separator rows and cell highlighting
//! - Keyboard-style cell selection over a rendered table
//! - Serializable report model with JSON and CSV writers

mod csv;
mod json;
mod report;
pub mod select;
pub mod table;

pub use csv::{CSV_HEADER, generate_csv_report};
pub use json::{generate_json_report, parse_json_report};
pub use report::{MetricInfo, MetricValue, Report, ReportEntry, ReportMeta, SCHEMA_VERSION};
pub use select::{Command, Selection, Selector, Step, organize_data, select_element_in_table};
pub use table::{
    CLEAR_SCREEN, Highlight, Row, Separator, column_widths, construct_row, construct_table,
    fetch_entry, print_table, separator_line, write_table,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "human" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
