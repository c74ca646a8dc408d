//! Quality Scoring
//!
//! Combines the six category scores into one overall score and derives the
//! star rating and production-readiness verdict shown in reports.
//!
//! # Scoring Formula
//!
//! ```text
//! Overall = Structure × 0.20 + ErrorHandling × 0.20
//!         + Performance × 0.15 + Security × 0.15
//!         + Maintainability × 0.15 + BestPractices × 0.15
//! ```
//!
//! Category scores are already clamped to [0, 10], so the overall score is
//! in [0, 10] as well. Reports carry it rounded to one decimal.

use crate::models::{Category, CategoryScores};

/// Weight of a category in the overall score. Weights sum to 1.0.
pub fn weight(category: Category) -> f64 {
    match category {
        Category::Structure => 0.20,
        Category::ErrorHandling => 0.20,
        Category::Performance => 0.15,
        Category::Security => 0.15,
        Category::Maintainability => 0.15,
        Category::BestPractices => 0.15,
    }
}

/// Unrounded weighted sum of the category scores
pub fn overall_score(scores: &CategoryScores) -> f64 {
    scores.iter().map(|(c, s)| s * weight(c)).sum()
}

/// Round to one decimal place for display.
///
/// Rounds the exact binary value, so `8.95` (stored as 8.9499...) becomes
/// 8.9. Exact halfway values go to the even tenth: 2.25 -> 2.2, 2.75 -> 2.8.
pub fn round_score(score: f64) -> f64 {
    let quarters = score * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (score * 10.0).floor();
        let even = if tenths % 2.0 == 0.0 { tenths } else { tenths + 1.0 };
        return even / 10.0;
    }
    // fixed-precision formatting works on the exact decimal expansion
    format!("{score:.1}").parse().unwrap_or(score)
}

/// Star rating, 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn from_score(score: f64) -> Self {
        let stars = match score {
            s if s >= 9.0 => 5,
            s if s >= 7.0 => 4,
            s if s >= 5.0 => 3,
            s if s >= 3.0 => 2,
            _ => 1,
        };
        Rating(stars)
    }

}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..5 {
            f.write_str(if i < self.0 { "★" } else { "☆" })?;
        }
        Ok(())
    }
}

/// Coarse production-readiness classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ReadyExcellent,
    ReadyMinorWork,
    NotReady,
    NeedsImprovement,
}

impl Verdict {
    /// Checks run in a fixed order: the two score thresholds (both requiring
    /// no critical issue), then the critical veto, then the fallback.
    pub fn evaluate(score: f64, has_critical: bool) -> Self {
        if score >= 9.0 && !has_critical {
            Verdict::ReadyExcellent
        } else if score >= 7.0 && !has_critical {
            Verdict::ReadyMinorWork
        } else if has_critical {
            Verdict::NotReady
        } else {
            Verdict::NeedsImprovement
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::ReadyExcellent => "PRODUCTION READY - Excellent code quality!",
            Verdict::ReadyMinorWork => {
                "PRODUCTION READY - Good code quality with minor improvements needed"
            }
            Verdict::NotReady => "NOT PRODUCTION READY - Critical issues must be fixed",
            Verdict::NeedsImprovement => {
                "NEEDS IMPROVEMENT - Significant refactoring recommended"
            }
        }
    }
}
