//! Best practices analyzer
//!
//! `print()` calls instead of logging, and function names that are not
//! snake_case.

use crate::detectors::base::{AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};

const PRINT_PENALTY: f64 = 0.2;
const NAMING_PENALTY: f64 = 0.3;

/// Constructor name exempt from the naming rule
const CONSTRUCTOR: &str = "__init__";

pub struct BestPracticesAnalyzer;

impl Analyzer for BestPracticesAnalyzer {
    fn name(&self) -> &'static str {
        "best-practices"
    }

    fn category(&self) -> Category {
        Category::BestPractices
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        for (node, callee) in ctx.tree.calls() {
            if callee.is_name("print") {
                card.flag(
                    Issue::new(
                        Severity::Low,
                        node.start_line,
                        "Print Statement",
                        "Consider using logging instead of print()",
                    ),
                    PRINT_PENALTY,
                );
            }
        }

        for (node, func) in ctx.tree.functions() {
            if !is_lowercase(&func.name) && func.name != CONSTRUCTOR {
                card.flag(
                    Issue::new(
                        Severity::Low,
                        node.start_line,
                        "Naming Convention",
                        format!("Function '{}' should use snake_case", func.name),
                    ),
                    NAMING_PENALTY,
                );
            }
        }
    }
}

/// At least one lowercase letter and no uppercase ones. Names without any
/// cased character (e.g. `_`) are not lowercase.
fn is_lowercase(name: &str) -> bool {
    name.chars().any(char::is_lowercase) && !name.chars().any(char::is_uppercase)
}
