//! Per-file analysis pipeline
//!
//! Runs the full analysis of one source file:
//! 1. Parse the source into a syntax tree
//! 2. Collect metrics
//! 3. Run the six category analyzers
//! 4. Aggregate the overall score and bucket issues by severity
//!
//! A source that does not parse short-circuits after step 1: the report holds
//! a single CRITICAL "Syntax Error" issue with zeroed metrics and scores.

pub mod metrics;

use std::path::Path;
use tracing::{debug, info};

use crate::config::RuleConfig;
use crate::detectors::{self, AnalysisContext};
use crate::error::AnalysisResult;
use crate::models::{CategoryScores, Issue, IssueBuckets, Metrics, Report, Severity};
use crate::parsers::{python, ParseError};
use crate::scoring;
use crate::source::SourceUnit;

/// Read and analyze one file
pub fn analyze_file(path: &Path, rules: &RuleConfig) -> AnalysisResult<Report> {
    let unit = SourceUnit::load(path)?;
    analyze_source(&unit, rules)
}

/// Analyze an already loaded source
pub fn analyze_source(unit: &SourceUnit, rules: &RuleConfig) -> AnalysisResult<Report> {
    let tree = match python::parse(unit.text()) {
        Ok(tree) => tree,
        Err(ParseError::Syntax { line, message }) => {
            info!("{}: syntax error at line {}", unit.path().display(), line);
            return Ok(syntax_error_report(unit, line, message));
        }
        Err(ParseError::Parser(e)) => return Err(e),
    };

    let metrics = metrics::collect(unit, &tree);
    let ctx = AnalysisContext {
        source: unit,
        tree: &tree,
        rules,
    };

    let mut category_scores = CategoryScores::default();
    let mut issues = IssueBuckets::default();
    for outcome in detectors::run_all(&ctx) {
        category_scores.set(outcome.category, outcome.score);
        issues.extend(outcome.issues);
    }

    let overall_score = scoring::round_score(scoring::overall_score(&category_scores));
    let total_issues = issues.total();
    info!(
        "{}: score {:.1}, {} issue(s)",
        unit.path().display(),
        overall_score,
        total_issues
    );

    Ok(Report {
        file: unit.name().to_string(),
        path: unit.path().to_path_buf(),
        overall_score,
        category_scores,
        metrics,
        issues,
        total_issues,
    })
}

fn syntax_error_report(unit: &SourceUnit, line: u32, message: String) -> Report {
    debug!("Skipping analyzers for {}", unit.name());
    let mut issues = IssueBuckets::default();
    issues.push(Issue::new(Severity::Critical, line, "Syntax Error", message));
    Report {
        file: unit.name().to_string(),
        path: unit.path().to_path_buf(),
        overall_score: 0.0,
        category_scores: CategoryScores::default(),
        metrics: Metrics::default(),
        total_issues: issues.total(),
        issues,
    }
}
