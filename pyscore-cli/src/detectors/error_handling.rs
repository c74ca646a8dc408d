//! Error handling analyzer

use crate::detectors::base::{AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};
use crate::parsers::NodeKind;

const BARE_EXCEPT_PENALTY: f64 = 2.0;
const NO_ERROR_HANDLING_PENALTY: f64 = 2.0;

pub struct ErrorHandlingAnalyzer;

impl Analyzer for ErrorHandlingAnalyzer {
    fn name(&self) -> &'static str {
        "error-handling"
    }

    fn category(&self) -> Category {
        Category::ErrorHandling
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        let mut try_blocks = 0usize;
        let mut functions = 0usize;

        for node in ctx.tree.walk() {
            match node.kind {
                NodeKind::ExceptHandler { bare: true } => card.flag(
                    Issue::new(
                        Severity::High,
                        node.start_line,
                        "Bare Except Clause",
                        "Using bare except: catches all exceptions including system exits",
                    ),
                    BARE_EXCEPT_PENALTY,
                ),
                NodeKind::Try => try_blocks += 1,
                NodeKind::FunctionDef(_) => functions += 1,
                _ => {}
            }
        }

        if try_blocks == 0 && functions > 0 {
            card.flag(
                Issue::new(
                    Severity::Medium,
                    0,
                    "No Error Handling",
                    "No try/except blocks found",
                ),
                NO_ERROR_HANDLING_PENALTY,
            );
        }
    }
}
