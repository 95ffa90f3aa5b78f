//! Seeded train/test partitioning

use crate::error::{LipidError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A train/test partition of a dataset
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
    /// Source row of each training sample
    pub train_indices: Vec<usize>,
    /// Source row of each test sample
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    pub fn n_train(&self) -> usize {
        self.train_indices.len()
    }

    pub fn n_test(&self) -> usize {
        self.test_indices.len()
    }
}

/// Shuffle rows with a seeded RNG and hold out `ceil(test_fraction · n)` of them.
///
/// Both partitions are guaranteed non-empty.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n = x.nrows();

    if n != y.len() {
        return Err(LipidError::ShapeError {
            expected: format!("y length = {}", n),
            actual: format!("y length = {}", y.len()),
        });
    }

    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(LipidError::ConfigError(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    if n < 2 {
        return Err(LipidError::DataError(format!(
            "need at least 2 complete rows to split, got {}",
            n
        )));
    }

    let n_test = ((n as f64 * test_fraction).ceil() as usize).clamp(1, n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_indices = indices[..n_test].to_vec();
    let train_indices = indices[n_test..].to_vec();

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), &train_indices),
        x_test: x.select(Axis(0), &test_indices),
        y_train: y.select(Axis(0), &train_indices),
        y_test: y.select(Axis(0), &test_indices),
        train_indices,
        test_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 3), |(i, j)| (i * 10 + j) as f64);
        let y = Array1::from_shape_fn(n, |i| i as f64);
        (x, y)
    }

    #[test]
    fn test_sizes() {
        let (x, y) = data(10);
        let split = train_test_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(split.n_test(), 2);
        assert_eq!(split.n_train(), 8);

        let (x, y) = data(11);
        let split = train_test_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(split.n_test(), 3);
        assert_eq!(split.n_train(), 8);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let (x, y) = data(50);
        let split = train_test_split(&x, &y, 0.2, 42).unwrap();

        let mut all: Vec<usize> = split
            .train_indices
            .iter()
            .chain(split.test_indices.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());

        for (row, &src) in split.test_indices.iter().enumerate() {
            assert_eq!(split.y_test[row], src as f64);
            assert_eq!(split.x_test[[row, 0]], (src * 10) as f64);
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let (x, y) = data(30);
        let a = train_test_split(&x, &y, 0.2, 42).unwrap();
        let b = train_test_split(&x, &y, 0.2, 42).unwrap();
        let c = train_test_split(&x, &y, 0.2, 43).unwrap();
        assert_eq!(a.test_indices, b.test_indices);
        assert_ne!(a.test_indices, c.test_indices);
    }

    #[test]
    fn test_two_rows_minimum() {
        let (x, y) = data(2);
        let split = train_test_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(split.n_train(), 1);
        assert_eq!(split.n_test(), 1);

        let (x, y) = data(1);
        assert!(matches!(
            train_test_split(&x, &y, 0.2, 42),
            Err(LipidError::DataError(_))
        ));
    }

    #[test]
    fn test_invalid_fraction() {
        let (x, y) = data(10);
        assert!(train_test_split(&x, &y, 0.0, 42).is_err());
        assert!(train_test_split(&x, &y, 1.0, 42).is_err());
    }
}
