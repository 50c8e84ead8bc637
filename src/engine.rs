//! The scoring engine: validated end-to-end scoring over a swappable model
//! artifact.
//!
//! The loaded model is process-wide read-only shared state. It lives behind
//! `RwLock<Option<Arc<ScoreModel>>>`: readers clone the `Arc` and predict
//! without holding the lock, and re-training replaces the `Arc` in one swap
//! instead of mutating the model in place.

use crate::applicant::Applicant;
use crate::error::{FiarError, Result};
use crate::explain::explain;
use crate::model::{ScoreModel, TrainConfig, TrainReport};
use crate::postprocess::{bound, RiskCategory};
use crate::storage::UserStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Result of scoring one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Bounded integer score in `[300, 900]`.
    pub score: i32,
    /// Risk category derived from the score.
    pub risk_category: RiskCategory,
    /// Ordered factor statements plus the overall verdict.
    pub explanations: Vec<String>,
}

/// Scoring engine holding the current model artifact.
///
/// # Examples
///
/// ```
/// use fiar::applicant::{Applicant, IncomeTier};
/// use fiar::engine::ScoringEngine;
/// use fiar::model::TrainConfig;
///
/// let engine = ScoringEngine::new();
/// engine.train(&TrainConfig::small()).expect("training should succeed");
///
/// let applicant = Applicant::new("Asha", 28)
///     .with_income(IncomeTier::High, 75000.0)
///     .with_education_level(4)
///     .with_digital_transactions(45)
///     .with_payment_history(true, true)
///     .with_employment_months(24);
/// let report = engine.score(&applicant).expect("scoring should succeed");
/// assert!((300..=900).contains(&report.score));
/// ```
#[derive(Debug, Default)]
pub struct ScoringEngine {
    model: RwLock<Option<Arc<ScoreModel>>>,
}

impl ScoringEngine {
    /// Creates an engine with no model installed. Scoring fails with
    /// `ModelNotReady` until [`train`](Self::train),
    /// [`load_or_train`](Self::load_or_train), or
    /// [`install`](Self::install) runs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine serving an already-built model.
    #[must_use]
    pub fn with_model(model: ScoreModel) -> Self {
        Self {
            model: RwLock::new(Some(Arc::new(model))),
        }
    }

    /// Trains a fresh model and atomically swaps it in.
    ///
    /// # Errors
    ///
    /// Returns a training error; on failure the previous model (if any)
    /// keeps serving.
    pub fn train(&self, config: &TrainConfig) -> Result<TrainReport> {
        let (model, report) = ScoreModel::train(config)?;
        self.install(model);
        Ok(report)
    }

    /// Loads the artifact at `path` or trains and persists one, then swaps
    /// it in. Returns the training report when training happened.
    ///
    /// # Errors
    ///
    /// Returns an error if both loading and training fail; initialization
    /// must abort in that case rather than serve without a model.
    pub fn load_or_train<P: AsRef<Path>>(
        &self,
        path: P,
        config: &TrainConfig,
    ) -> Result<Option<TrainReport>> {
        let (model, report) = ScoreModel::load_or_train(path, config)?;
        self.install(model);
        Ok(report)
    }

    /// Atomically replaces the serving model.
    pub fn install(&self, model: ScoreModel) {
        let mut slot = self.model.write().expect("model lock poisoned");
        *slot = Some(Arc::new(model));
    }

    /// Returns true once a model is installed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.model.read().expect("model lock poisoned").is_some()
    }

    /// Snapshot of the current model artifact.
    #[must_use]
    pub fn model(&self) -> Option<Arc<ScoreModel>> {
        self.model.read().expect("model lock poisoned").clone()
    }

    /// Scores one applicant: validate, encode, predict, bound, classify,
    /// explain.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for out-of-range fields, `ModelNotReady` when no
    /// model is installed, or `Encoding` for an unknown tier label.
    pub fn score(&self, applicant: &Applicant) -> Result<ScoreReport> {
        applicant.validate()?;

        let model = self.model().ok_or(FiarError::ModelNotReady)?;
        let raw = model.predict_raw(applicant)?;
        let score = bound(raw);
        let risk_category = RiskCategory::from_score(score);
        let explanations = explain(applicant, score);

        Ok(ScoreReport {
            score,
            risk_category,
            explanations,
        })
    }

    /// Scores an applicant and upserts the record by name: a known name is
    /// updated in place, a new name is created. Returns the stored id with
    /// the report.
    ///
    /// # Errors
    ///
    /// Propagates any scoring error; the store is untouched on failure.
    pub fn score_and_store<S: UserStore>(
        &self,
        applicant: &Applicant,
        store: &mut S,
    ) -> Result<(u64, ScoreReport)> {
        let report = self.score(applicant)?;

        let id = match store.find_user_id_by_name(&applicant.name) {
            Some(existing_id) => {
                let updated =
                    store.update_user(existing_id, applicant, report.score, report.risk_category);
                debug_assert!(updated, "id returned by find_user_id_by_name must be updatable");
                existing_id
            }
            None => store.create_user(applicant, report.score, report.risk_category),
        };

        Ok((id, report))
    }
}
