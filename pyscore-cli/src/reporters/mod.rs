//! Output reporters for pyscore analysis results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors and star ratings
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::Report;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Rendering knobs shared by the formats
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Issues listed per severity bucket in text output
    pub max_issues_per_severity: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_issues_per_severity: 5,
        }
    }
}

/// Render reports in the given format.
///
/// Text output concatenates one block per report. JSON output is a single
/// object for one report and an array otherwise.
pub fn render(reports: &[Report], format: OutputFormat, options: RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(reports, options),
        OutputFormat::Json => json::render(reports),
    }
}
