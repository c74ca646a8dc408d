//! Core data models for pyscore
//!
//! These models are shared by the analyzers, the scoring code and the
//! reporters. A [`Report`] is built once per analyzed file and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for issues, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All severities in bucket order
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

/// A single finding. `line` is 1-based; 0 means the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub line: u32,
    pub kind: String,
    pub description: String,
    pub severity: Severity,
}

impl Issue {
    pub fn new(
        severity: Severity,
        line: u32,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            line,
            kind: kind.into(),
            description: description.into(),
            severity,
        }
    }

    /// Whether the issue points at a specific line
    pub fn has_line(&self) -> bool {
        self.line > 0
    }
}

/// Issues grouped by severity, each bucket in detection order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueBuckets {
    pub critical: Vec<Issue>,
    pub high: Vec<Issue>,
    pub medium: Vec<Issue>,
    pub low: Vec<Issue>,
}

impl IssueBuckets {
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Critical => self.critical.push(issue),
            Severity::High => self.high.push(issue),
            Severity::Medium => self.medium.push(issue),
            Severity::Low => self.low.push(issue),
        }
    }

    pub fn get(&self, severity: Severity) -> &[Issue] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn has_critical(&self) -> bool {
        !self.critical.is_empty()
    }

    /// All issues, critical bucket first
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        Severity::ALL.into_iter().flat_map(|s| self.get(s).iter())
    }
}

impl Extend<Issue> for IssueBuckets {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        for issue in iter {
            self.push(issue);
        }
    }
}

/// Size and shape metrics of one file
///
/// `lines_of_code` is the raw line count, blank and comment lines included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub lines_of_code: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub functions: usize,
    pub classes: usize,
    pub max_function_length: u32,
    pub avg_function_length: f64,
}

/// The six scored categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Structure,
    ErrorHandling,
    Performance,
    Security,
    Maintainability,
    BestPractices,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Structure,
        Category::ErrorHandling,
        Category::Performance,
        Category::Security,
        Category::Maintainability,
        Category::BestPractices,
    ];

    /// Key used in config and JSON output
    pub fn key(self) -> &'static str {
        match self {
            Category::Structure => "structure",
            Category::ErrorHandling => "error_handling",
            Category::Performance => "performance",
            Category::Security => "security",
            Category::Maintainability => "maintainability",
            Category::BestPractices => "best_practices",
        }
    }

    /// Human-readable title
    pub fn title(self) -> &'static str {
        match self {
            Category::Structure => "Structure",
            Category::ErrorHandling => "Error Handling",
            Category::Performance => "Performance",
            Category::Security => "Security",
            Category::Maintainability => "Maintainability",
            Category::BestPractices => "Best Practices",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category scores in [0, 10]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub structure: f64,
    pub error_handling: f64,
    pub performance: f64,
    pub security: f64,
    pub maintainability: f64,
    pub best_practices: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Structure => self.structure,
            Category::ErrorHandling => self.error_handling,
            Category::Performance => self.performance,
            Category::Security => self.security,
            Category::Maintainability => self.maintainability,
            Category::BestPractices => self.best_practices,
        }
    }

    pub fn set(&mut self, category: Category, score: f64) {
        let slot = match category {
            Category::Structure => &mut self.structure,
            Category::ErrorHandling => &mut self.error_handling,
            Category::Performance => &mut self.performance,
            Category::Security => &mut self.security,
            Category::Maintainability => &mut self.maintainability,
            Category::BestPractices => &mut self.best_practices,
        };
        *slot = score;
    }

    /// (category, score) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Final result of analyzing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub file: String,
    pub path: PathBuf,
    pub overall_score: f64,
    pub category_scores: CategoryScores,
    pub metrics: Metrics,
    pub issues: IssueBuckets,
    pub total_issues: usize,
}

impl Report {
    pub fn has_critical(&self) -> bool {
        self.issues.has_critical()
    }
}
