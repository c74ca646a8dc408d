//! Performance analyzer
//!
//! A `for` loop that builds a list with `.append()` calls is usually clearer
//! and faster as a comprehension.

use crate::detectors::base::{AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};
use crate::parsers::{Node, NodeKind};

const COMPREHENSION_PENALTY: f64 = 0.3;

pub struct PerformanceAnalyzer;

impl Analyzer for PerformanceAnalyzer {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        for node in ctx.tree.walk() {
            if node.kind == NodeKind::For && appends_in_body(node) {
                card.flag(
                    Issue::new(
                        Severity::Low,
                        node.start_line,
                        "List Comprehension Opportunity",
                        "Consider using list comprehension",
                    ),
                    COMPREHENSION_PENALTY,
                );
            }
        }
    }
}

/// Any statement below the loop, at any depth, that is a bare `x.append(...)` call
fn appends_in_body(loop_node: &Node) -> bool {
    loop_node.descendants().any(|n| {
        matches!(&n.kind, NodeKind::ExprStmt { call: Some(callee) } if callee.is_method("append"))
    })
}
