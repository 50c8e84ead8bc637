//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use fiar::prelude::*;
//! ```

pub use crate::applicant::{Applicant, IncomeTier};
pub use crate::engine::{ScoreReport, ScoringEngine};
pub use crate::error::{FiarError, Result};
pub use crate::explain::explain;
pub use crate::model::{ScoreModel, TrainConfig, TrainReport};
pub use crate::postprocess::{bound, RiskCategory, SCORE_MAX, SCORE_MIN};
pub use crate::preprocessing::{encode_applicant, TierEncoder, FEATURE_NAMES};
pub use crate::primitives::{Matrix, Vector};
pub use crate::storage::{MemoryStore, ScoredUser, UserStore};
pub use crate::synthetic::{deterministic_score, SyntheticGenerator};
pub use crate::tree::RandomForestRegressor;
