//! Core compute primitives (Vector, Matrix).
//!
//! Row-major numeric containers backing the regression trees and metrics.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
