//! Structure analyzer
//!
//! Flags long functions and repeated lines.

use crate::detectors::base::{AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};
use std::collections::HashMap;

const LONG_FUNCTION_HIGH_PENALTY: f64 = 1.0;
const LONG_FUNCTION_MEDIUM_PENALTY: f64 = 0.5;
const DUPLICATION_PENALTY: f64 = 1.0;

pub struct StructureAnalyzer;

impl Analyzer for StructureAnalyzer {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        let rules = ctx.rules;

        for (node, func) in ctx.tree.functions() {
            let length = node.line_span();
            if length > rules.long_function_max {
                card.flag(
                    Issue::new(
                        Severity::High,
                        node.start_line,
                        "Long Function",
                        format!(
                            "Function '{}' is {} lines (>{})",
                            func.name, length, rules.long_function_max
                        ),
                    ),
                    LONG_FUNCTION_HIGH_PENALTY,
                );
            } else if length > rules.long_function_warn {
                card.flag(
                    Issue::new(
                        Severity::Medium,
                        node.start_line,
                        "Long Function",
                        format!(
                            "Function '{}' is {} lines (>{})",
                            func.name, length, rules.long_function_warn
                        ),
                    ),
                    LONG_FUNCTION_MEDIUM_PENALTY,
                );
            }
        }

        if has_duplicate_lines(
            ctx.source.lines(),
            rules.duplicate_min_chars,
            rules.duplicate_max_repeats,
        ) {
            card.flag(
                Issue::new(
                    Severity::Medium,
                    0,
                    "Code Duplication",
                    "Potential code duplication detected",
                ),
                DUPLICATION_PENALTY,
            );
        }
    }
}

/// Whether any trimmed code line longer than `min_chars` characters occurs
/// more than `max_repeats` times
fn has_duplicate_lines(lines: &[String], min_chars: usize, max_repeats: usize) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.chars().count() <= min_chars {
            continue;
        }
        *counts.entry(trimmed).or_insert(0) += 1;
    }
    counts.values().any(|&n| n > max_repeats)
}
