//! Maintainability analyzer
//!
//! Measures docstring and type hint coverage over all function definitions.

use crate::detectors::base::{percentage, AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};

const LOW_DOCUMENTATION_PENALTY: f64 = 2.0;
const MISSING_TYPE_HINTS_PENALTY: f64 = 1.0;

pub struct MaintainabilityAnalyzer;

impl Analyzer for MaintainabilityAnalyzer {
    fn name(&self) -> &'static str {
        "maintainability"
    }

    fn category(&self) -> Category {
        Category::Maintainability
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        let mut total = 0usize;
        let mut documented = 0usize;
        let mut hinted = 0usize;
        for (_, func) in ctx.tree.functions() {
            total += 1;
            documented += usize::from(func.has_docstring);
            hinted += usize::from(func.has_type_hints);
        }
        if total == 0 {
            return;
        }

        let doc_coverage = percentage(documented, total);
        if doc_coverage < ctx.rules.min_doc_coverage {
            card.flag(
                Issue::new(
                    Severity::Medium,
                    0,
                    "Low Documentation",
                    format!("Only {doc_coverage:.0}% of functions have docstrings"),
                ),
                LOW_DOCUMENTATION_PENALTY,
            );
        }

        let hint_coverage = percentage(hinted, total);
        if hint_coverage < ctx.rules.min_type_hint_coverage {
            card.flag(
                Issue::new(
                    Severity::Low,
                    0,
                    "Missing Type Hints",
                    format!("Only {hint_coverage:.0}% of functions have type hints"),
                ),
                MISSING_TYPE_HINTS_PENALTY,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::base::test_support::{assert_score, kinds, run_on};

    #[test]
    fn test_undocumented_unannotated_function() {
        let outcome = run_on(&MaintainabilityAnalyzer, "def f():\n    pass");
        assert_eq!(kinds(&outcome), vec!["Low Documentation", "Missing Type Hints"]);
        assert_eq!(
            outcome.issues[0].description,
            "Only 0% of functions have docstrings"
        );
        assert_eq!(outcome.issues[1].severity, Severity::Low);
        assert_score(&outcome, 7.0);
    }

    #[test]
    fn test_no_functions_no_issues() {
        let outcome = run_on(&MaintainabilityAnalyzer, "x = 1\n");
        assert!(outcome.issues.is_empty());
        assert_score(&outcome, 10.0);
    }

    #[test]
    fn test_half_documented_is_enough() {
        let src = "\
def a(x: int) -> int:
    \"\"\"Doubles x.\"\"\"
    return x * 2

def b(y):
    return y
";
        let outcome = run_on(&MaintainabilityAnalyzer, src);
        assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
    }

    #[test]
    fn test_coverage_percentage_in_message() {
        let src = "\
def a():
    \"\"\"Documented.\"\"\"

def b():
    pass

def c():
    pass
";
        let outcome = run_on(&MaintainabilityAnalyzer, src);
        assert_eq!(
            outcome.issues[0].description,
            "Only 33% of functions have docstrings"
        );
        assert_score(&outcome, 7.0);
    }
}
