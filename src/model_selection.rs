//! Train/test splitting for model evaluation.

use crate::primitives::{Matrix, Vector};
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled sample indices, reproducible when a seed is given.
fn shuffle_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }

    indices
}

/// Copies the selected samples into a new (features, targets) pair.
fn extract_samples(x: &Matrix<f32>, y: &Vector<f32>, indices: &[usize]) -> (Matrix<f32>, Vector<f32>) {
    let n_features = x.shape().1;
    let mut data = Vec::with_capacity(indices.len() * n_features);
    let mut targets = Vec::with_capacity(indices.len());

    for &idx in indices {
        for col in 0..n_features {
            data.push(x.get(idx, col));
        }
        targets.push(y.as_slice()[idx]);
    }

    let matrix = Matrix::from_vec(indices.len(), n_features, data)
        .expect("extracted dimensions are consistent by construction");
    (matrix, Vector::from_vec(targets))
}

/// Splits a dataset into shuffled train and test partitions.
///
/// `test_size` is the test fraction in (0, 1). With the same `random_state`
/// the split is reproducible.
///
/// # Errors
///
/// Returns an error if the dataset is empty, lengths disagree, `test_size`
/// is out of range, or either partition would be empty.
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vector<f32>, Vector<f32>), String> {
    let n_samples = x.shape().0;

    if n_samples == 0 {
        return Err("Cannot split an empty dataset".to_string());
    }
    if n_samples != y.len() {
        return Err("Number of samples in X and y must match".to_string());
    }
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err("test_size must be in (0, 1)".to_string());
    }

    let n_test = ((n_samples as f32) * test_size).round() as usize;
    let n_train = n_samples - n_test;
    if n_train == 0 || n_test == 0 {
        return Err("Both partitions must be non-empty".to_string());
    }

    let indices = shuffle_indices(n_samples, random_state);
    let train_indices = &indices[..n_train];
    let test_indices = &indices[n_train..];

    let (x_train, y_train) = extract_samples(x, y, train_indices);
    let (x_test, y_test) = extract_samples(x, y, test_indices);

    Ok((x_train, x_test, y_train, y_test))
}
