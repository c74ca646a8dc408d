//! Project-level configuration support
//!
//! Loads configuration from `pyscore.toml` next to the analyzed code, or from
//! an explicit `--config` path. The configuration is read once and shared
//! read-only by every analysis run.
//!
//! # Configuration Format
//!
//! ```toml
//! # pyscore.toml
//!
//! [rules]
//! long_function_warn = 50
//! long_function_max = 100
//! duplicate_min_chars = 20
//! duplicate_max_repeats = 2
//! min_doc_coverage = 50.0
//! min_type_hint_coverage = 30.0
//!
//! [exclude]
//! paths = ["build/**", "**/migrations/**"]
//!
//! [report]
//! max_issues_per_severity = 5
//! format = "text"
//! ```

use crate::error::{AnalysisError, AnalysisResult};
use crate::reporters::OutputFormat;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// File name looked up in the analyzed directory
pub const CONFIG_FILE_NAME: &str = "pyscore.toml";

/// Root of `pyscore.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub rules: RuleConfig,

    #[serde(default)]
    pub exclude: ExcludeConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Rule thresholds. Penalties and severities are not configurable.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Function length (lines after the header) above which a MEDIUM issue is raised
    #[serde(default = "default_long_function_warn")]
    pub long_function_warn: u32,

    /// Function length above which a HIGH issue is raised instead
    #[serde(default = "default_long_function_max")]
    pub long_function_max: u32,

    /// Trimmed lines must be longer than this to count toward duplication
    #[serde(default = "default_duplicate_min_chars")]
    pub duplicate_min_chars: usize,

    /// A line repeated more often than this is duplication
    #[serde(default = "default_duplicate_max_repeats")]
    pub duplicate_max_repeats: usize,

    /// Docstring coverage percentage below which documentation is flagged
    #[serde(default = "default_min_doc_coverage")]
    pub min_doc_coverage: f64,

    /// Type hint coverage percentage below which hints are flagged
    #[serde(default = "default_min_type_hint_coverage")]
    pub min_type_hint_coverage: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            long_function_warn: default_long_function_warn(),
            long_function_max: default_long_function_max(),
            duplicate_min_chars: default_duplicate_min_chars(),
            duplicate_max_repeats: default_duplicate_max_repeats(),
            min_doc_coverage: default_min_doc_coverage(),
            min_type_hint_coverage: default_min_type_hint_coverage(),
        }
    }
}

fn default_long_function_warn() -> u32 {
    50
}

fn default_long_function_max() -> u32 {
    100
}

fn default_duplicate_min_chars() -> usize {
    20
}

fn default_duplicate_max_repeats() -> usize {
    2
}

fn default_min_doc_coverage() -> f64 {
    50.0
}

fn default_min_type_hint_coverage() -> f64 {
    30.0
}

impl RuleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.long_function_warn > self.long_function_max {
            return Err(format!(
                "rules.long_function_warn ({}) must not exceed rules.long_function_max ({})",
                self.long_function_warn, self.long_function_max
            ));
        }
        for (key, value) in [
            ("min_doc_coverage", self.min_doc_coverage),
            ("min_type_hint_coverage", self.min_type_hint_coverage),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("rules.{key} must be between 0 and 100, got {value}"));
            }
        }
        Ok(())
    }
}

/// Path exclusion for directory scans
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
    /// Glob patterns, relative to the scanned directory
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Report rendering defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Issues listed per severity in text output before "... and N more"
    #[serde(default = "default_max_issues_per_severity")]
    pub max_issues_per_severity: usize,

    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_issues_per_severity: default_max_issues_per_severity(),
            format: None,
        }
    }
}

fn default_max_issues_per_severity() -> usize {
    5
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(format) = &self.format {
            OutputFormat::from_str(format).map_err(|e| format!("report.format: {e}"))?;
        }
        Ok(())
    }
}

/// Load `pyscore.toml` from a directory.
///
/// Returns the default configuration when the file is absent or invalid; an
/// invalid file is logged and ignored.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
        return ProjectConfig::default();
    }

    match load_config_file(&path) {
        Ok(config) => {
            debug!("Loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {}", path.display(), e);
            ProjectConfig::default()
        }
    }
}

/// Load and validate a specific configuration file
pub fn load_config_file(path: &Path) -> AnalysisResult<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|message| AnalysisError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> Result<ProjectConfig, String> {
    let config: ProjectConfig = toml::from_str(content).map_err(|e| e.to_string())?;
    config.rules.validate()?;
    config.report.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests;
