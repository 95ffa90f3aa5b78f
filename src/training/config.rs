//! Trainer configuration

use crate::data::{LipidUnits, DEFAULT_DATASET_PATH};
use crate::inference::DEFAULT_ARTIFACT_PATH;
use super::random_forest::MaxFeatures;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Training dataset
    pub data_path: PathBuf,

    /// Where the fitted model is written (overwritten on every run)
    pub artifact_path: PathBuf,

    /// CSV field separator
    pub separator: u8,

    /// Units of the lipid measurements in the dataset
    pub units: LipidUnits,

    /// Held-out fraction for evaluation
    pub test_fraction: f64,

    /// Seed for the split and the forest
    pub random_state: u64,

    /// Number of parallel jobs (None = all cores)
    pub n_jobs: Option<usize>,

    // Forest parameters. The defaults are the production policy; the
    // remaining knobs are set through the fields for library use and
    // are not exposed by the CLI.
    /// Number of trees
    pub n_estimators: usize,

    /// Maximum depth of each tree
    pub max_depth: Option<usize>,

    /// Minimum samples to split a node
    pub min_samples_split: usize,

    /// Minimum samples per leaf
    pub min_samples_leaf: usize,

    /// Features considered per split
    pub max_features: MaxFeatures,

    /// Bootstrap sampling per tree
    pub bootstrap: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATASET_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            separator: b',',
            units: LipidUnits::MgDl,
            test_fraction: 0.2,
            random_state: 42,
            n_jobs: None,
            n_estimators: 100,
            max_depth: Some(20),
            min_samples_split: 2,
            min_samples_leaf: 5,
            max_features: MaxFeatures::All,
            bootstrap: true,
        }
    }
}

impl TrainerConfig {
    /// Create a configuration for the given dataset
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the artifact path
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Builder method to set the CSV separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Builder method to set measurement units
    pub fn with_units(mut self, units: LipidUnits) -> Self {
        self.units = units;
        self
    }

    /// Builder method to set the number of trees
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    /// Builder method to set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Builder method to cap parallelism
    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }
}
