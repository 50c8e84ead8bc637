//! The trained model artifact: fitted forest, tier encoder, and feature
//! ordering, persisted and restored as one blob.
//!
//! The feature ordering is embedded in the artifact rather than re-derived at
//! load time; a mismatched ordering would silently shift every feature, so
//! loading verifies it against the encoder contract and refuses to serve.

use crate::applicant::Applicant;
use crate::error::{FiarError, Result};
use crate::metrics::{r_squared, rmse};
use crate::model_selection::train_test_split;
use crate::preprocessing::{encode_applicant, TierEncoder, FEATURE_NAMES, N_FEATURES};
use crate::primitives::{Matrix, Vector};
use crate::synthetic::SyntheticGenerator;
use crate::tree::RandomForestRegressor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Training hyperparameters.
///
/// Defaults match the reference configuration: 500 synthetic samples, a
/// 100-tree forest of depth 10 with minimum split 5 and minimum leaf 2,
/// an 80/20 evaluation split, seed 42.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of synthetic training rows to generate.
    pub n_samples: usize,
    /// Number of trees in the forest.
    pub n_estimators: usize,
    /// Maximum depth per tree.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Minimum samples required at a leaf.
    pub min_samples_leaf: usize,
    /// Held-out fraction for the evaluation report.
    pub test_size: f32,
    /// Seed for data generation, splitting, and bootstrap sampling.
    pub random_state: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_samples: 500,
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            test_size: 0.2,
            random_state: 42,
        }
    }
}

impl TrainConfig {
    /// A small configuration for fast tests and demos.
    #[must_use]
    pub fn small() -> Self {
        Self {
            n_samples: 150,
            n_estimators: 12,
            max_depth: 8,
            ..Self::default()
        }
    }
}

/// Evaluation metrics from one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// R² on the training partition.
    pub train_r2: f32,
    /// R² on the held-out partition.
    pub test_r2: f32,
    /// RMSE on the training partition.
    pub train_rmse: f32,
    /// RMSE on the held-out partition.
    pub test_rmse: f32,
}

/// The persisted scoring model: forest + tier encoder + feature ordering.
///
/// Immutable once trained or loaded; re-training produces a new artifact.
///
/// # Examples
///
/// ```no_run
/// use fiar::model::{ScoreModel, TrainConfig};
///
/// let (model, report) = ScoreModel::train(&TrainConfig::small()).unwrap();
/// println!("test R2: {:.3}", report.test_r2);
/// model.save("credit_model.bin").unwrap();
/// let restored = ScoreModel::load("credit_model.bin").unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreModel {
    forest: RandomForestRegressor,
    encoder: TierEncoder,
    feature_names: Vec<String>,
}

impl ScoreModel {
    /// Trains a new model on freshly generated synthetic data and reports
    /// train/test metrics.
    ///
    /// # Errors
    ///
    /// Returns `FiarError::Training` if data generation, splitting, or
    /// forest fitting fails. A failed training run must abort startup; the
    /// engine never serves without a model.
    pub fn train(config: &TrainConfig) -> Result<(Self, TrainReport)> {
        let dataset = SyntheticGenerator::new(config.n_samples)
            .with_random_state(config.random_state)
            .generate()?;

        let (x_train, x_test, y_train, y_test) = train_test_split(
            &dataset.features,
            &dataset.targets,
            config.test_size,
            Some(config.random_state),
        )
        .map_err(|message| FiarError::Training { message })?;

        let mut forest = RandomForestRegressor::new(config.n_estimators)
            .with_max_depth(config.max_depth)
            .with_min_samples_split(config.min_samples_split)
            .with_min_samples_leaf(config.min_samples_leaf)
            .with_random_state(config.random_state);
        forest.fit(&x_train, &y_train).map_err(|e| FiarError::Training {
            message: e.to_string(),
        })?;

        let train_pred = forest.predict(&x_train);
        let test_pred = forest.predict(&x_test);
        let report = TrainReport {
            train_r2: r_squared(&y_train, &train_pred),
            test_r2: r_squared(&y_test, &test_pred),
            train_rmse: rmse(&y_train, &train_pred),
            test_rmse: rmse(&y_test, &test_pred),
        };

        let model = Self {
            forest,
            encoder: dataset.encoder,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        };

        Ok((model, report))
    }

    /// Saves the artifact to a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| FiarError::Serialization(format!("artifact encode failed: {e}")))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads an artifact from a binary file and verifies its feature
    /// ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, the blob does not decode,
    /// or the embedded feature ordering disagrees with the encoder contract.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let model: Self = bincode::deserialize(&bytes)
            .map_err(|e| FiarError::Serialization(format!("artifact decode failed: {e}")))?;

        if model.feature_names.len() != N_FEATURES
            || model
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(stored, expected)| stored != expected)
        {
            return Err(FiarError::Serialization(format!(
                "artifact feature ordering {:?} does not match {FEATURE_NAMES:?}",
                model.feature_names
            )));
        }

        Ok(model)
    }

    /// Loads the artifact at `path` if it exists, otherwise trains a new
    /// model with `config` and persists it there.
    ///
    /// # Errors
    ///
    /// Returns an error if both loading and training fail.
    pub fn load_or_train<P: AsRef<Path>>(
        path: P,
        config: &TrainConfig,
    ) -> Result<(Self, Option<TrainReport>)> {
        if path.as_ref().exists() {
            return Ok((Self::load(path)?, None));
        }
        let (model, report) = Self::train(config)?;
        model.save(path)?;
        Ok((model, Some(report)))
    }

    /// Predicts the continuous, unbounded score estimate for one applicant.
    ///
    /// The raw estimate may fall outside `[300, 900]`; callers bound it with
    /// [`crate::postprocess::bound`].
    ///
    /// # Errors
    ///
    /// Returns `FiarError::ModelNotReady` if the forest is unfitted, or an
    /// encoding error for an unknown tier label.
    pub fn predict_raw(&self, applicant: &Applicant) -> Result<f32> {
        if !self.forest.is_fitted() {
            return Err(FiarError::ModelNotReady);
        }

        let features = encode_applicant(applicant, Some(&self.encoder))?;
        let x = Matrix::from_vec(1, N_FEATURES, features.to_vec())
            .map_err(|e| FiarError::Other(e.to_string()))?;
        let predictions: Vector<f32> = self.forest.predict(&x);
        Ok(predictions.as_slice()[0])
    }

    /// The tier encoder fitted at training time.
    #[must_use]
    pub fn encoder(&self) -> &TierEncoder {
        &self.encoder
    }

    /// The feature ordering embedded at training time.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Normalized feature importances of the fitted forest.
    #[must_use]
    pub fn feature_importances(&self) -> Option<Vec<f32>> {
        self.forest.feature_importances()
    }
}
