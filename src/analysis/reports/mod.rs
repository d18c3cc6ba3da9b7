//! Report formatting and output generation
//!
//! Provides formatting for analysis results via the [`ReportFormatter`] facade.
//! Supports Console and JSON output formats.

pub mod tree;
pub mod utils;

use crate::errors::AppResult;
use crate::types::TreeReport;

/// Output format options for analysis reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl OutputFormat {
    /// Parse a format name; anything unrecognised falls back to console
    pub fn parse(format_str: &str) -> Self {
        match format_str.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_number(n: usize) -> String {
        utils::format_number(n)
    }

    pub fn format_tree_report(r: &TreeReport, f: &OutputFormat) -> AppResult<String> {
        tree::format_tree_report(r, f)
    }
}
