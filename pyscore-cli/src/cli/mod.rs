//! CLI definition and handler

mod files;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::models::Report;
use crate::pipeline;
use crate::reporters::{self, OutputFormat, RenderOptions};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use console::style;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// pyscore - Python code quality analyzer
#[derive(Parser, Debug)]
#[command(name = "pyscore")]
#[command(
    version,
    about = "Analyze Python code quality",
    long_about = "Scores Python source files on structure, error handling, performance, \
security, maintainability and best practices, and reports the issues found.",
    after_help = "\
Examples:
  pyscore --file app.py                      Analyze one file
  pyscore --directory src                    Analyze every .py file under src
  pyscore --directory src --format json      JSON output for scripting
  pyscore --file app.py --output report.txt  Write the report to a file"
)]
pub struct Cli {
    #[command(flatten)]
    pub target: Target,

    /// Output report file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format: text or json (default: from pyscore.toml, else text)
    #[arg(long, short = 'f', value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Config file (default: pyscore.toml in the analyzed directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,
}

/// What to analyze; exactly one is required
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Path to Python file to analyze
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Path to directory to analyze
    #[arg(long)]
    pub directory: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    let (files, config) = if let Some(file) = &cli.target.file {
        if !file.is_file() {
            bail!("File not found: {}", file.display());
        }
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let config = resolve_config(cli.config.as_deref(), dir)?;
        (vec![file.clone()], config)
    } else if let Some(dir) = &cli.target.directory {
        if !dir.is_dir() {
            bail!("Directory not found: {}", dir.display());
        }
        let config = resolve_config(cli.config.as_deref(), dir)?;
        let files = files::collect_source_files(dir, &config.exclude.paths)?;
        (files, config)
    } else {
        bail!("Either --file or --directory is required");
    };

    let format = match cli.format.as_deref().or(config.report.format.as_deref()) {
        Some(f) => OutputFormat::from_str(f)?,
        None => OutputFormat::default(),
    };

    eprintln!(
        "\n{} Analyzing {} file(s)...\n",
        style("pyscore").bold().cyan().for_stderr(),
        style(files.len()).cyan().for_stderr()
    );

    let reports = if cli.target.file.is_some() {
        files
            .iter()
            .map(|path| {
                pipeline::analyze_file(path, &config.rules)
                    .with_context(|| format!("Failed to analyze {}", path.display()))
            })
            .collect::<Result<Vec<Report>>>()?
    } else {
        analyze_all(&files, &config, cli.workers)?
    };

    if cli.output.is_some() {
        console::set_colors_enabled(false);
    }
    let options = RenderOptions {
        max_issues_per_severity: config.report.max_issues_per_severity,
    };
    let output = reporters::render(&reports, format, options)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to: {}", style(path.display()).cyan().for_stderr());
        }
        None => print!("{output}"),
    }
    Ok(())
}

/// Explicit `--config` must load; a discovered file falls back to defaults
fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => {
            debug!("Using config {}", path.display());
            Ok(load_config_file(path)?)
        }
        None => Ok(load_project_config(dir)),
    }
}

/// Analyze files on a worker pool. Reports keep the order of `files`. Files
/// that cannot be read as UTF-8 text are logged and left out, so the result
/// can be shorter than `files`.
fn analyze_all(files: &[PathBuf], config: &ProjectConfig, workers: usize) -> Result<Vec<Report>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let results: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path, pipeline::analyze_file(path, &config.rules)))
            .collect()
    });

    Ok(results
        .into_iter()
        .filter_map(|(path, result)| match result {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect())
}
