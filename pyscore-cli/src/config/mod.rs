//! Configuration module for pyscore
//!
//! This module handles:
//! - Project-level configuration (pyscore.toml)
//! - Rule threshold overrides
//! - Directory-scan exclusions
//! - Report defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, ExcludeConfig, ProjectConfig, ReportConfig,
    RuleConfig, CONFIG_FILE_NAME,
};
