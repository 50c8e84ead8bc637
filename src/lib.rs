//! Fiar: an alternative-data credit scoring engine in pure Rust.
//!
//! Fiar estimates a creditworthiness score in [300, 900] for individuals
//! without traditional bureau history, from self-reported signals: digital
//! payment activity, rent and utility punctuality, employment tenure, and
//! education. It trains a random forest regressor on synthetic data generated
//! from a transparent additive formula, and explains each score with
//! rule-based statements derived from the raw profile.
//!
//! # Quick Start
//!
//! ```
//! use fiar::prelude::*;
//!
//! let engine = ScoringEngine::new();
//! engine.train(&TrainConfig::small()).unwrap();
//!
//! let applicant = Applicant::new("Asha", 28)
//!     .with_income(IncomeTier::High, 75000.0)
//!     .with_education_level(4)
//!     .with_digital_transactions(45)
//!     .with_payment_history(true, true)
//!     .with_employment_months(24);
//!
//! let report = engine.score(&applicant).unwrap();
//! assert!((300..=900).contains(&report.score));
//! assert!(!report.explanations.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`applicant`]: Applicant record, income tier, validation
//! - [`synthetic`]: Synthetic training-data generation and the additive target formula
//! - [`preprocessing`]: Income-tier label encoding and the fixed feature ordering
//! - [`tree`]: CART regression trees and the random forest ensemble
//! - [`metrics`]: Regression metrics (R², MSE, RMSE)
//! - [`model_selection`]: Train/test splitting
//! - [`model`]: The trained artifact (forest + encoder + feature order), persistence
//! - [`postprocess`]: Score bounding and risk classification
//! - [`explain`]: Rule-based explanation generation
//! - [`engine`]: End-to-end scoring over a swappable model artifact
//! - [`storage`]: Persistence collaborator interface and in-memory store
//! - [`primitives`]: Core Vector and Matrix types

pub mod applicant;
pub mod engine;
pub mod error;
pub mod explain;
pub mod metrics;
pub mod model;
pub mod model_selection;
pub mod postprocess;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod storage;
pub mod synthetic;
pub mod tree;

pub use error::{FiarError, Result};
pub use primitives::{Matrix, Vector};
