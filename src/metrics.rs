//! Regression evaluation metrics (R², MSE, RMSE).

use crate::primitives::Vector;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// # Examples
///
/// ```
/// use fiar::metrics::r_squared;
/// use fiar::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[650.0, 720.0, 540.0, 810.0]);
/// let y_pred = Vector::from_slice(&[655.0, 710.0, 548.0, 800.0]);
/// assert!(r_squared(&y_true, &y_pred) > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_true: &Vector<f32>, y_pred: &Vector<f32>) -> f32 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "y_true and y_pred must have the same length"
    );

    let mean = y_true.mean();
    let ss_tot: f32 = y_true.iter().map(|&y| (y - mean).powi(2)).sum();
    let ss_res: f32 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        // Constant target: perfect iff residuals are zero.
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

/// Mean squared error.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_true: &Vector<f32>, y_pred: &Vector<f32>) -> f32 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "y_true and y_pred must have the same length"
    );
    assert!(!y_true.is_empty(), "MSE of empty vectors is undefined");

    let sum: f32 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    sum / y_true.len() as f32
}

/// Root mean squared error.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_true: &Vector<f32>, y_pred: &Vector<f32>) -> f32 {
    mse(y_true, y_pred).sqrt()
}
