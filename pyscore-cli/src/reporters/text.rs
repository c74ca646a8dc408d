//! Text (terminal) reporter with colors and formatting

use crate::models::{Report, Severity};
use crate::reporters::RenderOptions;
use crate::scoring::{Rating, Verdict};
use anyhow::Result;
use console::{style, StyledObject};
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

fn severity_style(severity: Severity, text: String) -> StyledObject<String> {
    match severity {
        Severity::Critical => style(text).red().bold(),
        Severity::High => style(text).red(),
        Severity::Medium => style(text).yellow(),
        Severity::Low => style(text).blue(),
    }
}

fn score_style(score: f64) -> StyledObject<String> {
    let text = format!("{score:.1}/10");
    match score {
        s if s >= 9.0 => style(text).green(),
        s if s >= 7.0 => style(text).green().dim(),
        s if s >= 5.0 => style(text).yellow(),
        _ => style(text).red(),
    }
}

/// Render every report, one block each
pub fn render(reports: &[Report], options: RenderOptions) -> Result<String> {
    let mut out = String::new();
    for report in reports {
        render_one(&mut out, report, options)?;
    }
    Ok(out)
}

fn render_one(out: &mut String, report: &Report, options: RenderOptions) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", style(&rule).dim())?;
    writeln!(out, "{} {}", style("CODE QUALITY REPORT -").bold(), style(&report.file).bold().cyan())?;
    writeln!(out, "{}", style(&rule).dim())?;

    writeln!(out)?;
    writeln!(
        out,
        "Overall Quality Score: {} {}",
        style(format!("{:.1}/10", report.overall_score)).bold(),
        style(Rating::from_score(report.overall_score)).yellow()
    )?;

    writeln!(out)?;
    writeln!(out, "{}", style("Category Scores:").bold())?;
    for (category, score) in report.category_scores.iter() {
        writeln!(out, "  - {}: {}", category.title(), score_style(score))?;
    }

    let m = &report.metrics;
    writeln!(out)?;
    writeln!(out, "{}", style("Code Metrics:").bold())?;
    writeln!(out, "  - Lines of Code: {}", m.lines_of_code)?;
    writeln!(out, "  - Comment Lines: {}", m.comment_lines)?;
    writeln!(out, "  - Blank Lines: {}", m.blank_lines)?;
    writeln!(out, "  - Functions: {}", m.functions)?;
    writeln!(out, "  - Classes: {}", m.classes)?;
    if m.max_function_length > 0 {
        writeln!(out, "  - Max Function Length: {} lines", m.max_function_length)?;
    }
    if m.avg_function_length > 0.0 {
        writeln!(out, "  - Avg Function Length: {:.1} lines", m.avg_function_length)?;
    }

    writeln!(out)?;
    writeln!(out, "{} {}", style("Issues Found:").bold(), report.total_issues)?;
    for severity in Severity::ALL {
        let issues = report.issues.get(severity);
        if issues.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(
            out,
            "  {}",
            severity_style(severity, format!("{} ({}):", severity, issues.len()))
        )?;
        for issue in issues.iter().take(options.max_issues_per_severity) {
            if issue.has_line() {
                writeln!(out, "    - Line {}: {}", issue.line, issue.kind)?;
            } else {
                writeln!(out, "    - {}", issue.kind)?;
            }
            writeln!(out, "      {}", style(&issue.description).dim())?;
        }
        if issues.len() > options.max_issues_per_severity {
            writeln!(
                out,
                "    ... and {} more",
                issues.len() - options.max_issues_per_severity
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", style(&rule).dim())?;
    let verdict = Verdict::evaluate(report.overall_score, report.has_critical());
    let line = match verdict {
        Verdict::ReadyExcellent | Verdict::ReadyMinorWork => style(verdict.message()).green(),
        Verdict::NotReady => style(verdict.message()).red().bold(),
        Verdict::NeedsImprovement => style(verdict.message()).yellow(),
    };
    writeln!(out, "{line}")?;
    writeln!(out, "{}", style(&rule).dim())?;
    Ok(())
}
