//! Random forest regressor

use crate::error::{LipidError, Result};
use super::decision_tree::DecisionTree;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Individual trees
    trees: Vec<DecisionTree>,
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features considered per split
    pub max_features: MaxFeatures,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random state
    pub random_state: Option<u64>,
    /// Feature importances
    feature_importances: Option<Vec<f64>>,
    /// Number of features
    n_features: usize,
}

/// Number of features considered at each split
///
/// The trainer uses [`MaxFeatures::All`]; the subsampling strategies are
/// available to library callers through [`TrainerConfig`](super::TrainerConfig).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of n_features
    Sqrt,
    /// Log2 of n_features
    Log2,
    /// Fraction of n_features
    Fraction(f64),
    /// Fixed number
    Fixed(usize),
    /// All features
    All,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RandomForest {
    /// Create a new regressor forest
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::All,
            bootstrap: true,
            random_state: None,
            feature_importances: None,
            n_features: 0,
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    /// Set max features strategy
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Enable or disable bootstrap sampling
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    fn compute_max_features(&self, n_features: usize) -> usize {
        match self.max_features {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().ceil() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().ceil() as usize,
            MaxFeatures::Fraction(f) => (n_features as f64 * f).ceil() as usize,
            MaxFeatures::Fixed(n) => n.min(n_features),
            MaxFeatures::All => n_features,
        }
        .clamp(1, n_features.max(1))
    }

    /// Fit the forest to training data
    ///
    /// Trees are built in parallel on the current rayon pool. Each tree
    /// draws from its own RNG seeded from `random_state` and its index, so
    /// the result does not depend on the number of threads.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(LipidError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }

        if n_samples == 0 {
            return Err(LipidError::TrainingError("no training samples".to_string()));
        }

        if self.n_estimators == 0 {
            return Err(LipidError::ValidationError(
                "n_estimators must be at least 1".to_string(),
            ));
        }

        self.n_features = n_features;
        let max_features = self.compute_max_features(n_features);
        let base_seed = self.random_state.unwrap_or(42);

        let trees: Vec<DecisionTree> = (0..self.n_estimators)
            .into_par_iter()
            .map(|tree_idx| -> Result<DecisionTree> {
                let seed = base_seed.wrapping_add(tree_idx as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                let sample_indices: Vec<usize> = if self.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };

                let x_boot = x.select(Axis(0), &sample_indices);
                let y_boot = y.select(Axis(0), &sample_indices);

                let mut tree = DecisionTree::new()
                    .with_min_samples_split(self.min_samples_split)
                    .with_min_samples_leaf(self.min_samples_leaf)
                    .with_max_features(max_features)
                    .with_random_state(rng.next_u64());

                if let Some(d) = self.max_depth {
                    tree = tree.with_max_depth(d);
                }

                tree.fit(&x_boot, &y_boot)?;
                Ok(tree)
            })
            .collect::<Result<Vec<DecisionTree>>>()?;

        self.trees = trees;
        self.compute_feature_importances();

        Ok(self)
    }

    fn compute_feature_importances(&mut self) {
        if self.trees.is_empty() {
            return;
        }

        let mut total_importances = vec![0.0; self.n_features];

        for tree in &self.trees {
            if let Some(imp) = tree.feature_importances() {
                for (total, &val) in total_importances.iter_mut().zip(imp) {
                    *total += val;
                }
            }
        }

        let sum: f64 = total_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut total_importances {
                *imp /= sum;
            }
        }

        self.feature_importances = Some(total_importances);
    }

    /// Mean prediction of all trees for one row
    pub fn predict_row(&self, sample: ArrayView1<'_, f64>) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(LipidError::ModelNotFitted);
        }
        if sample.len() != self.n_features {
            return Err(LipidError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", sample.len()),
            });
        }

        let sum = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(sample))
            .sum::<Result<f64>>()?;

        Ok(sum / self.trees.len() as f64)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(LipidError::ModelNotFitted);
        }

        let predictions = (0..x.nrows())
            .into_par_iter()
            .map(|i| self.predict_row(x.row(i)))
            .collect::<Result<Vec<f64>>>()?;

        Ok(Array1::from_vec(predictions))
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }

    /// Number of input features the forest was fitted on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Get number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Deepest tree in the forest
    pub fn max_tree_depth(&self) -> usize {
        self.trees.iter().map(|t| t.get_depth()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn linear_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 3), |(i, j)| ((i * (j + 3)) % 97) as f64);
        let y = x.map_axis(Axis(1), |row| row[0] - row[1] - row[2] / 5.0);
        (x, y)
    }

    #[test]
    fn test_regressor() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];

        let mut rf = RandomForest::new(10).with_random_state(42);
        rf.fit(&x, &y).unwrap();

        let predictions = rf.predict(&x).unwrap();

        let mse: f64 = predictions
            .iter()
            .zip(y.iter())
            .map(|(p, a)| (p - a).powi(2))
            .sum::<f64>()
            / y.len() as f64;

        assert!(mse < 2.0, "MSE too high: {}", mse);
        assert_eq!(rf.n_trees(), 10);
    }

    #[test]
    fn test_feature_importances() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];

        let mut rf = RandomForest::new(10).with_random_state(42);
        rf.fit(&x, &y).unwrap();

        let importances = rf.feature_importances().unwrap();
        assert_eq!(importances.len(), 2);
        assert!(importances[0] >= importances[1]);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let (x, y) = linear_data(200);

        let mut a = RandomForest::new(8).with_max_depth(6).with_random_state(7);
        let mut b = RandomForest::new(8).with_max_depth(6).with_random_state(7);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn test_hyperparameters_respected() {
        let (x, y) = linear_data(300);

        let mut rf = RandomForest::new(5)
            .with_max_depth(4)
            .with_min_samples_leaf(5)
            .with_random_state(1);
        rf.fit(&x, &y).unwrap();

        assert!(rf.max_tree_depth() <= 4);
    }

    #[test]
    fn test_predict_row_matches_predict() {
        let (x, y) = linear_data(100);

        let mut rf = RandomForest::new(6).with_random_state(3);
        rf.fit(&x, &y).unwrap();

        let batch = rf.predict(&x).unwrap();
        let single = rf.predict_row(x.row(17)).unwrap();
        assert_eq!(batch[17], single);
    }

    #[test]
    fn test_predict_row_wrong_width() {
        let (x, y) = linear_data(50);

        let mut rf = RandomForest::new(3).with_random_state(3);
        rf.fit(&x, &y).unwrap();

        let err = rf.predict_row(array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(err, LipidError::ShapeError { .. }));
    }

    #[test]
    fn test_max_features_strategies() {
        let rf = RandomForest::new(1).with_max_features(MaxFeatures::Sqrt);
        assert_eq!(rf.compute_max_features(9), 3);
        let rf = RandomForest::new(1).with_max_features(MaxFeatures::Fixed(10));
        assert_eq!(rf.compute_max_features(3), 3);
        let rf = RandomForest::new(1).with_max_features(MaxFeatures::Fraction(0.1));
        assert_eq!(rf.compute_max_features(3), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut rf = RandomForest::new(3);
        let x = Array2::<f64>::zeros((0, 3));
        let y = Array1::<f64>::zeros(0);
        assert!(matches!(rf.fit(&x, &y), Err(LipidError::TrainingError(_))));
    }
}
