//! Rule analyzers
//!
//! One analyzer per score category. Each walks the shared syntax tree and/or
//! the raw lines of a file and owns the scorecard of its category.
//!
//! # Architecture
//!
//! ```text
//!        SourceUnit + SyntaxTree (read-only)
//!                      │
//!   ┌──────────┬───────┴───┬──────────┬─────────────┬──────────────┐
//!   ▼          ▼           ▼          ▼             ▼              ▼
//! Structure  ErrorHandl. Performance Security  Maintainability BestPractices
//!   │          │           │          │             │              │
//!   └──────────┴───────────┴────┬─────┴─────────────┴──────────────┘
//!                               ▼
//!              CategoryScores + issues (detection order)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let outcomes = detectors::run_all(&ctx);
//! ```

mod base;
mod best_practices;
mod error_handling;
mod maintainability;
mod performance;
mod security;
mod structure;

pub use base::{
    percentage, AnalysisContext, Analyzer, CategoryOutcome, Scorecard, MAX_CATEGORY_SCORE,
};
pub use best_practices::BestPracticesAnalyzer;
pub use error_handling::ErrorHandlingAnalyzer;
pub use maintainability::MaintainabilityAnalyzer;
pub use performance::PerformanceAnalyzer;
pub use security::SecurityAnalyzer;
pub use structure::StructureAnalyzer;

use tracing::debug;

/// The six analyzers in report order
pub fn default_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(StructureAnalyzer),
        Box::new(ErrorHandlingAnalyzer),
        Box::new(PerformanceAnalyzer),
        Box::new(SecurityAnalyzer),
        Box::new(MaintainabilityAnalyzer),
        Box::new(BestPracticesAnalyzer),
    ]
}

/// Run every analyzer on one file
pub fn run_all(ctx: &AnalysisContext<'_>) -> Vec<CategoryOutcome> {
    default_analyzers()
        .iter()
        .map(|analyzer| {
            let outcome = analyzer.run(ctx);
            debug!(
                "{}: {} issue(s), score {:.1}",
                analyzer.name(),
                outcome.issues.len(),
                outcome.score
            );
            outcome
        })
        .collect()
}
