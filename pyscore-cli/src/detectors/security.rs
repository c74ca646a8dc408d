//! Security analyzer
//!
//! Line-based secret detection plus `eval`/`exec` calls from the tree.

use crate::detectors::base::{AnalysisContext, Analyzer, Scorecard};
use crate::models::{Category, Issue, Severity};
use crate::parsers::Callee;
use regex::Regex;
use std::sync::OnceLock;

const SECRET_PENALTY: f64 = 3.0;
const DANGEROUS_CALL_PENALTY: f64 = 3.0;

/// Built-ins that execute arbitrary code
const DANGEROUS_BUILTINS: &[&str] = &["eval", "exec"];

static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

/// One pattern per secret name; a line may match several.
fn secret_patterns() -> &'static [Regex] {
    SECRET_PATTERNS.get_or_init(|| {
        ["password", "api_key", "secret", "token"]
            .iter()
            .map(|name| {
                Regex::new(&format!(r#"(?i){name}\s*=\s*["'].*["']"#))
                    .expect("secret pattern is a valid regex")
            })
            .collect()
    })
}

pub struct SecurityAnalyzer;

impl Analyzer for SecurityAnalyzer {
    fn name(&self) -> &'static str {
        "security"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, card: &mut Scorecard) {
        for (idx, line) in ctx.source.lines().iter().enumerate() {
            for pattern in secret_patterns() {
                if pattern.is_match(line) {
                    card.flag(
                        Issue::new(
                            Severity::Critical,
                            idx as u32 + 1,
                            "Hardcoded Secret",
                            "Potential hardcoded secret found",
                        ),
                        SECRET_PENALTY,
                    );
                }
            }
        }

        for (node, callee) in ctx.tree.calls() {
            let Callee::Name(name) = callee else {
                continue;
            };
            if DANGEROUS_BUILTINS.contains(&name.as_str()) {
                card.flag(
                    Issue::new(
                        Severity::Critical,
                        node.start_line,
                        "Dangerous Function",
                        format!("Use of {name}() is dangerous"),
                    ),
                    DANGEROUS_CALL_PENALTY,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::base::test_support::{assert_score, kinds, run_on};

    #[test]
    fn test_single_password_literal() {
        let outcome = run_on(&SecurityAnalyzer, "x = 1\npassword = \"x\"\n");
        assert_eq!(kinds(&outcome), vec!["Hardcoded Secret"]);
        assert_eq!(outcome.issues[0].line, 2);
        assert_eq!(outcome.issues[0].severity, Severity::Critical);
        assert_score(&outcome, 7.0);
    }

    #[test]
    fn test_case_insensitive_and_single_quotes() {
        let outcome = run_on(&SecurityAnalyzer, "API_KEY='abc123'\n");
        assert_eq!(outcome.issues.len(), 1);
    }

    #[test]
    fn test_line_matching_several_patterns_flags_each() {
        let outcome = run_on(&SecurityAnalyzer, "db_password = \"pw\"; token = \"t\"\n");
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome.issues.iter().all(|i| i.line == 1));
        assert_score(&outcome, 4.0);
    }

    #[test]
    fn test_unquoted_values_are_not_secrets() {
        let outcome = run_on(&SecurityAnalyzer, "password = os.environ['PW']\ntoken = get_token()\n");
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_eval_and_exec_calls() {
        let src = "value = eval(text)\nexec(code)\nobj.eval(text)\n";
        let outcome = run_on(&SecurityAnalyzer, src);
        assert_eq!(
            kinds(&outcome),
            vec!["Dangerous Function", "Dangerous Function"]
        );
        assert_eq!(outcome.issues[0].description, "Use of eval() is dangerous");
        assert_eq!(outcome.issues[1].line, 2);
        assert_score(&outcome, 4.0);
    }

    #[test]
    fn test_score_floor() {
        let src = "password = 'a'\npassword = 'b'\npassword = 'c'\npassword = 'd'\n";
        let outcome = run_on(&SecurityAnalyzer, src);
        assert_eq!(outcome.issues.len(), 4);
        assert_score(&outcome, 0.0);
    }
}
