//! Feature encoding: income-tier label encoding and applicant-to-vector
//! transformation.
//!
//! The feature vector is a fixed-order 9-element tuple; the ordering is part
//! of the trained model's contract and changing it invalidates any persisted
//! artifact. See [`FEATURE_NAMES`].
//!
//! The tier encoder is data-fitted: fitting sorts the observed labels, so the
//! fitted mapping for {low, medium, high} is high=0, low=1, medium=2. When no
//! fitted encoder is available, encoding falls back to the static mapping
//! low=0, medium=1, high=2. Both paths are deterministic; what matters is that
//! the same mapping is used at train and inference time, which the model
//! artifact guarantees by carrying its encoder.

use crate::applicant::{Applicant, IncomeTier};
use crate::error::{FiarError, Result};
use serde::{Deserialize, Serialize};

/// Number of features the regressor consumes.
pub const N_FEATURES: usize = 9;

/// Feature ordering, embedded in every model artifact.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "age",
    "monthly_income",
    "education_level",
    "digital_transactions",
    "rent_paid_on_time",
    "utility_bills_paid",
    "has_savings_account",
    "employment_months",
    "income_tier_encoded",
];

/// Label encoder for the income tier, fitted on observed tier strings.
///
/// Classes are stored sorted, so codes are assigned in lexicographic order.
///
/// # Examples
///
/// ```
/// use fiar::preprocessing::TierEncoder;
///
/// let mut encoder = TierEncoder::new();
/// encoder.fit(&["low", "medium", "high", "medium"]);
/// assert_eq!(encoder.transform("high").unwrap(), 0);
/// assert_eq!(encoder.transform("low").unwrap(), 1);
/// assert_eq!(encoder.transform("medium").unwrap(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierEncoder {
    classes: Vec<String>,
}

impl TierEncoder {
    /// Creates an unfitted encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Fits the encoder on observed labels. Duplicates are collapsed and
    /// classes are sorted before codes are assigned.
    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) {
        let mut classes: Vec<String> = labels.iter().map(|s| s.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        self.classes = classes;
    }

    /// Returns true once the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// The fitted classes, sorted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Maps a label to its fitted integer code.
    ///
    /// # Errors
    ///
    /// Returns `FiarError::Encoding` if the label was not seen during fit
    /// (or the encoder is unfitted).
    pub fn transform(&self, label: &str) -> Result<u32> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|idx| idx as u32)
            .ok_or_else(|| FiarError::Encoding {
                value: label.to_string(),
                known: self.classes.clone(),
            })
    }

    /// Maps a fitted code back to its label.
    ///
    /// # Errors
    ///
    /// Returns `FiarError::Encoding` if the code is out of range.
    pub fn inverse_transform(&self, code: u32) -> Result<&str> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or_else(|| FiarError::Encoding {
                value: code.to_string(),
                known: self.classes.clone(),
            })
    }
}

/// Static fallback mapping used when no fitted encoder is available.
#[must_use]
pub fn fallback_tier_code(tier: IncomeTier) -> u32 {
    match tier {
        IncomeTier::Low => 0,
        IncomeTier::Medium => 1,
        IncomeTier::High => 2,
    }
}

/// Encodes an applicant into the fixed-order feature vector.
///
/// Uses the fitted `encoder` when one is supplied and fitted; otherwise falls
/// back to [`fallback_tier_code`]. Pure and deterministic.
///
/// # Errors
///
/// Returns `FiarError::Encoding` if a fitted encoder is supplied but does not
/// know the applicant's tier label.
pub fn encode_applicant(
    applicant: &Applicant,
    encoder: Option<&TierEncoder>,
) -> Result<[f32; N_FEATURES]> {
    let tier_code = match encoder {
        Some(enc) if enc.is_fitted() => enc.transform(applicant.income_tier.as_str())?,
        _ => fallback_tier_code(applicant.income_tier),
    };

    Ok([
        applicant.age as f32,
        applicant.monthly_income,
        f32::from(applicant.education_level),
        applicant.digital_transactions as f32,
        f32::from(u8::from(applicant.rent_paid_on_time)),
        f32::from(u8::from(applicant.utility_bills_paid)),
        f32::from(u8::from(applicant.has_savings_account)),
        applicant.employment_months as f32,
        tier_code as f32,
    ])
}
