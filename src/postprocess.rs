//! Score bounding and risk classification.
//!
//! Pure functions over the regressor's continuous output. The risk category
//! is a function of the final score alone, never of the model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest valid credit score.
pub const SCORE_MIN: i32 = 300;

/// Highest valid credit score.
pub const SCORE_MAX: i32 = 900;

/// Clamps a raw regressor estimate into `[SCORE_MIN, SCORE_MAX]` and rounds
/// to the nearest integer. NaN input maps to `SCORE_MIN`.
///
/// # Examples
///
/// ```
/// use fiar::postprocess::bound;
///
/// assert_eq!(bound(912.4), 900);
/// assert_eq!(bound(250.0), 300);
/// assert_eq!(bound(649.6), 650);
/// ```
#[must_use]
pub fn bound(raw_score: f32) -> i32 {
    if raw_score.is_nan() {
        return SCORE_MIN;
    }
    let clamped = raw_score.clamp(SCORE_MIN as f32, SCORE_MAX as f32);
    clamped.round() as i32
}

/// Coarse risk classification of a credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Score >= 700.
    Low,
    /// 600 <= score < 700.
    Medium,
    /// Score < 600.
    High,
}

impl RiskCategory {
    /// Classifies a bounded score. Lower bounds are inclusive: 700 is Low
    /// Risk, 600 is Medium Risk.
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        if score >= 700 {
            RiskCategory::Low
        } else if score >= 600 {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    /// Human-readable label, as stored alongside user records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
