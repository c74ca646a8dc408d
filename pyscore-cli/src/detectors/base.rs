//! Base analyzer trait and types
//!
//! This module defines the core abstractions for rule analysis:
//! - `Analyzer` trait that all six category analyzers implement
//! - `AnalysisContext` holding the read-only inputs of one file
//! - `Scorecard`, the per-category accumulator an analyzer owns while it runs

use crate::config::RuleConfig;
use crate::models::{Category, Issue};
use crate::parsers::SyntaxTree;
use crate::source::SourceUnit;

/// Starting (and best possible) score of every category
pub const MAX_CATEGORY_SCORE: f64 = 10.0;

/// Read-only inputs shared by all analyzers of one file
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub source: &'a SourceUnit,
    pub tree: &'a SyntaxTree,
    pub rules: &'a RuleConfig,
}

/// Score accumulator for one category
///
/// Starts at [`MAX_CATEGORY_SCORE`]; every flagged issue subtracts its
/// penalty. The running value may go negative; [`Scorecard::finish`] clamps it
/// once.
#[derive(Debug, Clone)]
pub struct Scorecard {
    category: Category,
    score: f64,
    issues: Vec<Issue>,
}

impl Scorecard {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            score: MAX_CATEGORY_SCORE,
            issues: Vec::new(),
        }
    }

    /// Record an issue and apply its penalty
    pub fn flag(&mut self, issue: Issue, penalty: f64) {
        self.score -= penalty;
        self.issues.push(issue);
    }

    pub fn finish(self) -> CategoryOutcome {
        CategoryOutcome {
            category: self.category,
            score: self.score.clamp(0.0, MAX_CATEGORY_SCORE),
            issues: self.issues,
        }
    }
}

/// Result of one analyzer run
#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub category: Category,
    pub score: f64,
    pub issues: Vec<Issue>,
}

/// Trait for the category analyzers
///
/// Each analyzer walks the syntax tree and/or the raw lines of a file and
/// flags issues on the scorecard of its own category. Analyzers never see
/// each other's results, so their run order does not matter.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyAnalyzer;
///
/// impl Analyzer for MyAnalyzer {
///     fn name(&self) -> &'static str {
///         "my-analyzer"
///     }
///
///     fn category(&self) -> Category {
///         Category::BestPractices
///     }
///
///     fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
///         // Walk ctx.tree / ctx.source and call card.flag(...)
///     }
/// }
/// ```
pub trait Analyzer: Send + Sync {
    /// Unique identifier used in logs
    fn name(&self) -> &'static str;

    /// Category whose score this analyzer owns
    fn category(&self) -> Category;

    /// Flag every issue found in the file
    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard);

    /// Run on a fresh scorecard and return the clamped outcome
    fn run(&self, ctx: &AnalysisContext<'_>) -> CategoryOutcome {
        let mut card = Scorecard::new(self.category());
        self.analyze(ctx, &mut card);
        card.finish()
    }
}

/// Share of `part` in `total` as a percentage
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::parsers::python;

    /// Parse `src` and run one analyzer with default rules
    pub(crate) fn run_on(analyzer: &dyn Analyzer, src: &str) -> CategoryOutcome {
        let source = SourceUnit::from_text("test.py", src);
        let tree = python::parse(src).expect("test source must parse");
        let rules = RuleConfig::default();
        let ctx = AnalysisContext {
            source: &source,
            tree: &tree,
            rules: &rules,
        };
        analyzer.run(&ctx)
    }

    pub(crate) fn kinds(outcome: &CategoryOutcome) -> Vec<&str> {
        outcome.issues.iter().map(|i| i.kind.as_str()).collect()
    }

    pub(crate) fn assert_score(outcome: &CategoryOutcome, expected: f64) {
        assert!(
            (outcome.score - expected).abs() < 1e-9,
            "expected {expected}, got {}",
            outcome.score
        );
    }
}
