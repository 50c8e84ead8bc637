//! Credit scoring walkthrough.
//!
//! Trains the model on synthetic data, scores three applicant profiles, and
//! prints the explanations the way a lending dashboard would show them.

use fiar::prelude::*;

fn main() {
    println!("Fiar - Alternative-Data Credit Scoring");
    println!("======================================\n");

    println!("Training model on synthetic data...");
    let engine = ScoringEngine::new();
    let report = engine
        .train(&TrainConfig::default())
        .expect("training should succeed");
    println!(
        "Trained: train R2 {:.3}, test R2 {:.3}, test RMSE {:.1}\n",
        report.train_r2, report.test_r2, report.test_rmse
    );

    let applicants = vec![
        Applicant::new("Asha", 28)
            .with_occupation("shop owner")
            .with_income(IncomeTier::High, 75000.0)
            .with_education_level(4)
            .with_digital_transactions(55)
            .with_payment_history(true, true)
            .with_employment_months(36),
        Applicant::new("Ravi", 23)
            .with_occupation("delivery rider")
            .with_income(IncomeTier::Low, 18000.0)
            .with_education_level(2)
            .with_digital_transactions(40)
            .with_payment_history(true, false)
            .with_savings_account(false)
            .with_employment_months(8),
        Applicant::new("Meera", 41)
            .with_occupation("teacher")
            .with_income(IncomeTier::Medium, 42000.0)
            .with_education_level(5)
            .with_digital_transactions(12)
            .with_payment_history(true, true)
            .with_employment_months(96),
    ];

    let mut store = MemoryStore::new();

    for applicant in &applicants {
        let (id, report) = engine
            .score_and_store(applicant, &mut store)
            .expect("scoring should succeed");

        println!("{}", "-".repeat(50));
        println!(
            "#{id} {} ({}) -> {} [{}]",
            applicant.name, applicant.occupation, report.score, report.risk_category
        );
        for statement in &report.explanations {
            println!("  {statement}");
        }
    }

    println!("{}", "-".repeat(50));
    println!("\nStored records: {}", store.get_all_users().len());
}
