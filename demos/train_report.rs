//! Training diagnostics.
//!
//! Trains with the default configuration, persists the artifact, and prints
//! the evaluation metrics plus per-feature importances.

use fiar::prelude::*;

fn main() {
    println!("Fiar - Model Training Report");
    println!("============================\n");

    let (model, report) =
        ScoreModel::train(&TrainConfig::default()).expect("training should succeed");

    println!("Model Performance:");
    println!("  Training R2:  {:.3}", report.train_r2);
    println!("  Testing R2:   {:.3}", report.test_r2);
    println!("  Training RMSE: {:.2}", report.train_rmse);
    println!("  Testing RMSE:  {:.2}", report.test_rmse);

    if let Some(importances) = model.feature_importances() {
        let mut ranked: Vec<(&str, f32)> = FEATURE_NAMES
            .iter()
            .copied()
            .zip(importances)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("importances are finite"));

        println!("\nFeature Importance:");
        for (name, importance) in ranked {
            println!("  {name:<22} {importance:.4}");
        }
    }

    let path = "credit_model.bin";
    model.save(path).expect("save should succeed");
    println!("\nModel saved as '{path}'");
}
