//! Applicant record: the raw input describing one individual's financial
//! and behavioral profile.
//!
//! Name and occupation are opaque identifiers and never enter the feature
//! vector. Income tier and monthly income are supplied independently and may
//! be inconsistent; the engine does not reconcile them.

use crate::error::{FiarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported income tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeTier {
    Low,
    Medium,
    High,
}

impl IncomeTier {
    /// Canonical lowercase label, as stored and as fed to the tier encoder.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeTier::Low => "low",
            IncomeTier::Medium => "medium",
            IncomeTier::High => "high",
        }
    }

    /// All tiers, in declaration order.
    #[must_use]
    pub fn all() -> [IncomeTier; 3] {
        [IncomeTier::Low, IncomeTier::Medium, IncomeTier::High]
    }
}

impl fmt::Display for IncomeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IncomeTier {
    type Err = FiarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(IncomeTier::Low),
            "medium" => Ok(IncomeTier::Medium),
            "high" => Ok(IncomeTier::High),
            other => Err(FiarError::validation(
                "income_tier",
                &format!("unknown tier {other:?}, expected low/medium/high"),
            )),
        }
    }
}

/// One applicant's self-reported profile.
///
/// # Examples
///
/// ```
/// use fiar::applicant::{Applicant, IncomeTier};
///
/// let applicant = Applicant::new("Asha", 28)
///     .with_income(IncomeTier::High, 75000.0)
///     .with_education_level(4)
///     .with_digital_transactions(45)
///     .with_payment_history(true, true)
///     .with_employment_months(24);
/// assert!(applicant.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Opaque identifier, not a feature.
    pub name: String,
    /// Age in years (18..=100 accepted).
    pub age: u32,
    /// Free text, not a feature.
    pub occupation: String,
    /// Self-reported income tier.
    pub income_tier: IncomeTier,
    /// Monthly income in currency units.
    pub monthly_income: f32,
    /// Education level on a 1-5 scale.
    pub education_level: u8,
    /// Digital payment transactions per month.
    pub digital_transactions: u32,
    /// Rent paid on time over the reporting window.
    pub rent_paid_on_time: bool,
    /// Utility bills paid over the reporting window.
    pub utility_bills_paid: bool,
    /// Holds a savings account (defaults to true).
    pub has_savings_account: bool,
    /// Months in current employment (defaults to 12).
    pub employment_months: u32,
}

impl Applicant {
    /// Creates an applicant with the defaults the intake form uses:
    /// medium tier, zero income/activity, savings account present,
    /// 12 months employment.
    #[must_use]
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
            occupation: String::new(),
            income_tier: IncomeTier::Medium,
            monthly_income: 0.0,
            education_level: 1,
            digital_transactions: 0,
            rent_paid_on_time: false,
            utility_bills_paid: false,
            has_savings_account: true,
            employment_months: 12,
        }
    }

    /// Sets occupation (informational only).
    #[must_use]
    pub fn with_occupation(mut self, occupation: &str) -> Self {
        self.occupation = occupation.to_string();
        self
    }

    /// Sets income tier and monthly income together. The two are independent
    /// signals and are not cross-checked.
    #[must_use]
    pub fn with_income(mut self, tier: IncomeTier, monthly_income: f32) -> Self {
        self.income_tier = tier;
        self.monthly_income = monthly_income;
        self
    }

    /// Sets education level (1-5 scale).
    #[must_use]
    pub fn with_education_level(mut self, level: u8) -> Self {
        self.education_level = level;
        self
    }

    /// Sets the monthly digital-transaction count.
    #[must_use]
    pub fn with_digital_transactions(mut self, count: u32) -> Self {
        self.digital_transactions = count;
        self
    }

    /// Sets rent and utility payment punctuality flags.
    #[must_use]
    pub fn with_payment_history(mut self, rent_on_time: bool, utilities_paid: bool) -> Self {
        self.rent_paid_on_time = rent_on_time;
        self.utility_bills_paid = utilities_paid;
        self
    }

    /// Sets whether the applicant holds a savings account.
    #[must_use]
    pub fn with_savings_account(mut self, has_savings: bool) -> Self {
        self.has_savings_account = has_savings;
        self
    }

    /// Sets employment tenure in months.
    #[must_use]
    pub fn with_employment_months(mut self, months: u32) -> Self {
        self.employment_months = months;
        self
    }

    /// Validates field ranges. Rejection happens here, before any feature
    /// encoding, and names the offending field.
    ///
    /// # Errors
    ///
    /// Returns `FiarError::Validation` for the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FiarError::validation("name", "must not be empty"));
        }
        if !(18..=100).contains(&self.age) {
            return Err(FiarError::validation("age", "must be between 18 and 100"));
        }
        if !(1..=5).contains(&self.education_level) {
            return Err(FiarError::validation(
                "education_level",
                "must be between 1 and 5",
            ));
        }
        if !self.monthly_income.is_finite() || self.monthly_income < 0.0 {
            return Err(FiarError::validation(
                "monthly_income",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn valid_applicant() -> Applicant {
        Applicant::new("Ravi", 30)
            .with_income(IncomeTier::Medium, 40000.0)
            .with_education_level(3)
            .with_digital_transactions(25)
            .with_payment_history(true, false)
    }

    #[test]
    fn test_defaults() {
        let a = Applicant::new("Asha", 25);
        assert!(a.has_savings_account, "savings account defaults to true");
        assert_eq!(a.employment_months, 12, "employment defaults to 12 months");
        assert_eq!(a.income_tier, IncomeTier::Medium);
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_applicant().validate().is_ok());
    }

    #[test]
    fn test_validate_age_bounds() {
        let mut a = valid_applicant();
        a.age = 17;
        let err = a.validate().expect_err("age 17 should be rejected");
        assert!(err.to_string().contains("age"));

        a.age = 101;
        assert!(a.validate().is_err());

        a.age = 18;
        assert!(a.validate().is_ok());
        a.age = 100;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_validate_education_range() {
        let mut a = valid_applicant();
        a.education_level = 0;
        assert!(a.validate().is_err());
        a.education_level = 6;
        assert!(a.validate().is_err());
        a.education_level = 5;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_validate_income() {
        let mut a = valid_applicant();
        a.monthly_income = -1.0;
        let err = a.validate().expect_err("negative income should be rejected");
        assert!(err.to_string().contains("monthly_income"));

        a.monthly_income = f32::NAN;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let a = Applicant::new("  ", 30);
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_tier_roundtrip() {
        for tier in IncomeTier::all() {
            let parsed = IncomeTier::from_str(tier.as_str()).expect("known tier should parse");
            assert_eq!(parsed, tier);
        }
        assert!(IncomeTier::from_str("ultra").is_err());
    }
}
