//! Rule-based score explanations.
//!
//! Explanations are derived from the raw applicant record and the final
//! bounded score, never from the forest's internals. The forest only
//! approximates the additive formula, so re-deriving rationale from the
//! inputs is more truthful than dressing up tree paths. Rule order is fixed
//! and part of the consumer contract: income, payment history, digital
//! activity, education, employment, savings, overall verdict.

use crate::applicant::Applicant;

/// Generates the ordered factor statements for a scored applicant.
///
/// Each rule contributes at most one statement; the rules are independent of
/// each other. The list is built fresh on every call and the final entry is
/// always the overall verdict for `final_score`.
///
/// # Examples
///
/// ```
/// use fiar::applicant::{Applicant, IncomeTier};
/// use fiar::explain::explain;
///
/// let applicant = Applicant::new("Asha", 28)
///     .with_income(IncomeTier::High, 75000.0)
///     .with_education_level(4)
///     .with_digital_transactions(45)
///     .with_payment_history(true, true)
///     .with_employment_months(24);
/// let statements = explain(&applicant, 720);
/// assert!(statements.first().unwrap().contains("High monthly income"));
/// assert!(statements.last().unwrap().contains("Good credit score"));
/// ```
#[must_use]
pub fn explain(applicant: &Applicant, final_score: i32) -> Vec<String> {
    let mut explanations = Vec::new();

    // 1. Income
    if applicant.monthly_income >= 70000.0 {
        explanations.push("✅ High monthly income positively impacts your score".to_string());
    } else if applicant.monthly_income >= 50000.0 {
        explanations.push("✅ Good monthly income contributes to your score".to_string());
    } else if applicant.monthly_income < 30000.0 {
        explanations.push("⚠️ Lower income slightly reduces your score".to_string());
    }

    // 2. Payment history
    if applicant.rent_paid_on_time && applicant.utility_bills_paid {
        explanations.push("✅ Excellent payment history boosts your score".to_string());
    } else if applicant.rent_paid_on_time || applicant.utility_bills_paid {
        explanations.push("✅ Good payment history helps your score".to_string());
    } else {
        explanations.push("⚠️ Payment history needs improvement".to_string());
    }

    // 3. Digital activity
    if applicant.digital_transactions >= 50 {
        explanations
            .push("✅ High digital payment activity shows financial engagement".to_string());
    } else if applicant.digital_transactions >= 30 {
        explanations.push("✅ Good digital payment activity".to_string());
    } else if applicant.digital_transactions < 15 {
        explanations.push("💡 Increase digital payments to improve score".to_string());
    }

    // 4. Education
    if applicant.education_level >= 4 {
        explanations.push("✅ Higher education level positively affects score".to_string());
    } else if applicant.education_level <= 2 {
        explanations.push("💡 Education level considered in scoring".to_string());
    }

    // 5. Employment stability
    if applicant.employment_months >= 60 {
        explanations.push("✅ Long employment history demonstrates stability".to_string());
    } else if applicant.employment_months >= 24 {
        explanations.push("✅ Good employment stability".to_string());
    } else if applicant.employment_months < 12 {
        explanations.push("⚠️ Short employment history affects score".to_string());
    }

    // 6. Savings account
    if applicant.has_savings_account {
        explanations
            .push("✅ Having a savings account shows financial responsibility".to_string());
    } else {
        explanations.push("💡 Consider opening a savings account".to_string());
    }

    // 7. Overall verdict
    if final_score >= 750 {
        explanations.push("🎉 Excellent credit score! You qualify for the best rates".to_string());
    } else if final_score >= 650 {
        explanations.push("👍 Good credit score with favorable lending options".to_string());
    } else if final_score >= 550 {
        explanations.push("📈 Fair score with room for improvement".to_string());
    } else {
        explanations.push(
            "📊 Building credit score - focus on payment history and stability".to_string(),
        );
    }

    explanations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::IncomeTier;

    fn strong_applicant() -> Applicant {
        Applicant::new("Asha", 28)
            .with_income(IncomeTier::High, 75000.0)
            .with_education_level(4)
            .with_digital_transactions(45)
            .with_payment_history(true, true)
            .with_savings_account(true)
            .with_employment_months(24)
    }

    #[test]
    fn test_order_is_stable() {
        let applicant = strong_applicant();
        let first = explain(&applicant, 720);
        let second = explain(&applicant, 720);
        assert_eq!(first, second, "same input must yield identical ordered output");
    }

    #[test]
    fn test_strong_applicant_statements() {
        let statements = explain(&strong_applicant(), 720);
        assert!(statements[0].contains("High monthly income"));
        assert!(statements[1].contains("Excellent payment history"));
        assert!(statements.last().expect("verdict always present").contains("Good credit score"));
        // One statement per rule for this profile; transactions 45 hit the
        // middle band, education 4 and employment 24 the positive bands.
        assert_eq!(statements.len(), 7);
    }

    #[test]
    fn test_mid_income_band_is_silent() {
        // [30000, 50000) produces no income statement.
        let mut applicant = strong_applicant();
        applicant.monthly_income = 40000.0;
        let statements = explain(&applicant, 700);
        assert!(
            !statements.iter().any(|s| s.contains("income")),
            "mid-band income contributes no statement: {statements:?}"
        );
    }

    #[test]
    fn test_payment_history_branches() {
        let mut applicant = strong_applicant();

        applicant.rent_paid_on_time = true;
        applicant.utility_bills_paid = false;
        let one = explain(&applicant, 700);
        assert!(one.iter().any(|s| s.contains("Good payment history")));

        applicant.rent_paid_on_time = false;
        let none = explain(&applicant, 700);
        assert!(none.iter().any(|s| s.contains("Payment history needs improvement")));
    }

    #[test]
    fn test_digital_activity_bands() {
        let mut applicant = strong_applicant();

        applicant.digital_transactions = 50;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("High digital payment activity")));

        applicant.digital_transactions = 20;
        let silent = explain(&applicant, 700);
        assert!(
            !silent.iter().any(|s| s.contains("digital")),
            "band [15, 30) contributes no statement"
        );

        applicant.digital_transactions = 10;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("Increase digital payments")));
    }

    #[test]
    fn test_education_bands() {
        let mut applicant = strong_applicant();

        applicant.education_level = 3;
        let silent = explain(&applicant, 700);
        assert!(
            !silent.iter().any(|s| s.contains("ducation")),
            "education level 3 contributes no statement"
        );

        applicant.education_level = 2;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("Education level considered")));
    }

    #[test]
    fn test_employment_bands() {
        let mut applicant = strong_applicant();

        applicant.employment_months = 60;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("Long employment history")));

        applicant.employment_months = 11;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("Short employment history")));

        applicant.employment_months = 15;
        let silent = explain(&applicant, 700);
        assert!(
            !silent.iter().any(|s| s.contains("employment")),
            "band [12, 24) contributes no statement"
        );
    }

    #[test]
    fn test_savings_always_contributes() {
        let mut applicant = strong_applicant();
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("savings account shows financial responsibility")));

        applicant.has_savings_account = false;
        assert!(explain(&applicant, 700)
            .iter()
            .any(|s| s.contains("Consider opening a savings account")));
    }

    #[test]
    fn test_verdict_bands() {
        let applicant = strong_applicant();
        let verdict = |score: i32| explain(&applicant, score).pop().expect("verdict present");

        assert!(verdict(750).contains("Excellent credit score"));
        assert!(verdict(749).contains("Good credit score"));
        assert!(verdict(650).contains("Good credit score"));
        assert!(verdict(649).contains("Fair score"));
        assert!(verdict(550).contains("Fair score"));
        assert!(verdict(549).contains("Building credit score"));
    }
}
