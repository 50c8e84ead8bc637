//! End-to-end scoring pipeline tests.
//!
//! Exercises the full path: synthetic training, encoding, forest prediction,
//! bounding, risk classification, and explanation generation.

use fiar::prelude::*;
use proptest::prelude::*;

fn trained_engine() -> ScoringEngine {
    let engine = ScoringEngine::new();
    engine
        .train(&TrainConfig::small())
        .expect("training should succeed");
    engine
}

fn reference_applicant() -> Applicant {
    Applicant::new("Asha", 28)
        .with_income(IncomeTier::High, 75000.0)
        .with_education_level(4)
        .with_digital_transactions(45)
        .with_payment_history(true, true)
        .with_savings_account(true)
        .with_employment_months(24)
}

#[test]
fn end_to_end_reference_applicant() {
    let engine = trained_engine();
    let report = engine
        .score(&reference_applicant())
        .expect("scoring should succeed");

    assert!(
        (SCORE_MIN..=SCORE_MAX).contains(&report.score),
        "score {} out of range",
        report.score
    );
    assert_eq!(report.risk_category, RiskCategory::from_score(report.score));

    assert!(
        report
            .explanations
            .iter()
            .any(|s| s.contains("High monthly income")),
        "income-positive statement expected: {:?}",
        report.explanations
    );
    assert!(
        report
            .explanations
            .iter()
            .any(|s| s.contains("Excellent payment history")),
        "payment-history-positive statement expected"
    );
    let verdict = report.explanations.last().expect("verdict always present");
    assert!(
        verdict.contains("credit score") || verdict.contains("Fair score"),
        "final statement is the overall verdict, got {verdict:?}"
    );
}

#[test]
fn bounded_score_for_profile_grid() {
    let engine = trained_engine();

    // Sweep extremes of every signal; the bounded score must stay valid.
    for &income in &[0.0, 15000.0, 45000.0, 95000.0, 500000.0] {
        for &tier in &[IncomeTier::Low, IncomeTier::High] {
            for &months in &[0, 12, 120] {
                let applicant = Applicant::new("grid", 40)
                    .with_income(tier, income)
                    .with_education_level(3)
                    .with_digital_transactions(10)
                    .with_payment_history(false, true)
                    .with_employment_months(months);

                let report = engine.score(&applicant).expect("scoring should succeed");
                assert!(
                    (SCORE_MIN..=SCORE_MAX).contains(&report.score),
                    "profile (income={income}, tier={tier}, months={months}) scored {}",
                    report.score
                );
            }
        }
    }
}

#[test]
fn scoring_persists_through_artifact_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("model.bin");

    let engine = ScoringEngine::new();
    let report = engine
        .load_or_train(&path, &TrainConfig::small())
        .expect("initial call should train");
    assert!(report.is_some());

    let before = engine
        .score(&reference_applicant())
        .expect("scoring should succeed");

    // A fresh engine loading the same artifact must agree exactly.
    let reloaded = ScoringEngine::new();
    reloaded
        .load_or_train(&path, &TrainConfig::small())
        .expect("second call should load");
    let after = reloaded
        .score(&reference_applicant())
        .expect("scoring should succeed");

    assert_eq!(before, after, "loaded artifact must reproduce scores");
}

#[test]
fn upsert_flow_matches_store_contract() {
    let engine = trained_engine();
    let mut store = MemoryStore::new();

    let (id, report) = engine
        .score_and_store(&reference_applicant(), &mut store)
        .expect("scoring should succeed");

    let stored = store.get_user(id).expect("record should exist");
    assert_eq!(stored.credit_score, report.score);
    assert_eq!(stored.risk_category, report.risk_category);
    assert_eq!(store.find_user_id_by_name("Asha"), Some(id));
    assert_eq!(store.get_all_users().len(), 1);
}

proptest! {
    #[test]
    fn bound_always_lands_in_valid_range(raw in -5000.0f32..5000.0) {
        let score = bound(raw);
        prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&score));
    }

    #[test]
    fn classify_is_total_and_consistent(score in SCORE_MIN..=SCORE_MAX) {
        let category = RiskCategory::from_score(score);
        match category {
            RiskCategory::Low => prop_assert!(score >= 700),
            RiskCategory::Medium => prop_assert!((600..700).contains(&score)),
            RiskCategory::High => prop_assert!(score < 600),
        }
    }

    #[test]
    fn explanations_end_with_verdict(score in SCORE_MIN..=SCORE_MAX) {
        let statements = explain(&reference_applicant(), score);
        let verdict = statements.last().expect("verdict always present");
        prop_assert!(
            verdict.contains("Excellent credit score")
                || verdict.contains("Good credit score")
                || verdict.contains("Fair score")
                || verdict.contains("Building credit score")
        );
    }
}
