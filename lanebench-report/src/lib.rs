#![warn(missing_docs)]
//! LaneBench Report - Series, Charts and Output
//!
//! Turns finalized statistics into:
//! - Chart series (one per kind, one point per group, stddev error bars)
//! - Human-readable text with a bar chart
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//! - HTML (Plotly grouped bar chart)

mod csv;
mod html;
mod human;
mod json;
mod report;
mod series;

pub use csv::generate_csv_report;
pub use html::{HtmlChart, generate_html_report};
pub use human::{TextChart, format_human_output};
pub use json::generate_json_report;
pub use report::{
    GroupComparison, Report, ReportConfig, ReportMeta, ReportSummary, SCHEMA_VERSION,
    SpeedupEntry, StatisticRow, SystemInfo, build_report, compare_to_baseline,
};
pub use series::{ChartLayout, ChartRenderer, Series, build_series, publish};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Single-file HTML dashboard
    Html,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl OutputFormat {
    /// File extension for reports written in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
            OutputFormat::Human => "txt",
        }
    }
}
