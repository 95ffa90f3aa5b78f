//! Training pipeline
//!
//! load → clean → split → fit → evaluate → persist

use crate::data::{DatasetLoader, LipidDataset, LipidFeatures};
use crate::error::{LipidError, Result};
use crate::inference::ModelArtifact;
use super::metrics::{mean_absolute_error, RegressionMetrics};
use super::random_forest::RandomForest;
use super::report::TrainingReport;
use super::split::train_test_split;
use super::TrainerConfig;
use ndarray::{Array1, Array2};
use std::time::Instant;
use tracing::info;

/// Runs the training pipeline described by a [`TrainerConfig`]
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train on the configured file and write the artifact
    pub fn run(&self) -> Result<TrainingReport> {
        let dataset = DatasetLoader::new()
            .with_separator(self.config.separator)
            .load(&self.config.data_path)?;

        let (artifact, mut report) = self.fit_dataset(&dataset)?;

        artifact.save(&self.config.artifact_path)?;
        report.artifact_path = Some(self.config.artifact_path.clone());

        Ok(report)
    }

    /// Split, fit and evaluate without touching the filesystem
    pub fn fit_dataset(&self, dataset: &LipidDataset) -> Result<(ModelArtifact, TrainingReport)> {
        let start = Instant::now();

        if dataset.n_rows() < 2 {
            return Err(LipidError::DataError(format!(
                "{} complete rows after cleaning, need at least 2",
                dataset.n_rows()
            )));
        }

        let split = train_test_split(
            &dataset.features,
            &dataset.target,
            self.config.test_fraction,
            self.config.random_state,
        )?;
        info!(n_train = split.n_train(), n_test = split.n_test(), seed = self.config.random_state, "Dataset split");

        info!(
            n_estimators = self.config.n_estimators,
            max_depth = ?self.config.max_depth,
            min_samples_leaf = self.config.min_samples_leaf,
            n_jobs = ?self.config.n_jobs,
            "Fitting random forest"
        );

        let (forest, y_pred) = self.install(|| {
            let mut forest = self.build_forest();
            forest.fit(&split.x_train, &split.y_train)?;
            let y_pred = forest.predict(&split.x_test)?;
            Ok((forest, y_pred))
        })?;

        let metrics = RegressionMetrics::compute(&split.y_test, &y_pred);
        let friedewald_mae = self.friedewald_mae(&split.x_test, &split.y_test);
        info!(mae = metrics.mae, r2 = metrics.r2, friedewald_mae, "Evaluation on held-out rows");

        let artifact = ModelArtifact::new(forest, metrics, self.config.units);

        let report = TrainingReport {
            cleaning: dataset.report.clone(),
            n_train: split.n_train(),
            n_test: split.n_test(),
            metrics,
            friedewald_mae,
            units: self.config.units,
            feature_importances: artifact.feature_importances(),
            artifact_path: None,
            training_time_secs: start.elapsed().as_secs_f64(),
        };

        Ok((artifact, report))
    }

    fn build_forest(&self) -> RandomForest {
        let mut forest = RandomForest::new(self.config.n_estimators)
            .with_min_samples_split(self.config.min_samples_split)
            .with_min_samples_leaf(self.config.min_samples_leaf)
            .with_max_features(self.config.max_features)
            .with_bootstrap(self.config.bootstrap)
            .with_random_state(self.config.random_state);

        if let Some(depth) = self.config.max_depth {
            forest = forest.with_max_depth(depth);
        }

        forest
    }

    fn friedewald_mae(&self, x_test: &Array2<f64>, y_test: &Array1<f64>) -> f64 {
        let estimates: Array1<f64> = x_test
            .rows()
            .into_iter()
            .map(|row| LipidFeatures::new(row[0], row[1], row[2]).friedewald(self.config.units))
            .collect();
        mean_absolute_error(y_test, &estimates)
    }

    /// Run `f` on a dedicated pool when `n_jobs` is set, otherwise on the global one
    fn install<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send,
    {
        match self.config.n_jobs {
            None => f(),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| LipidError::ConfigError(format!("thread pool: {}", e)))?;
                pool.install(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LipidRecord;
    use crate::training::MaxFeatures;

    fn records(n: usize) -> Vec<LipidRecord> {
        (0..n)
            .map(|i| {
                let tc = 150.0 + (i * 37 % 120) as f64;
                let hdl_c = 35.0 + (i * 11 % 40) as f64;
                let tg = 80.0 + (i * 53 % 200) as f64;
                LipidRecord {
                    features: LipidFeatures::new(tc, hdl_c, tg),
                    ldl_c: tc - hdl_c - tg / 5.0 + (i % 5) as f64,
                }
            })
            .collect()
    }

    fn small_config() -> TrainerConfig {
        TrainerConfig::default().with_n_estimators(10)
    }

    #[test]
    fn test_fit_dataset_reports_metrics() {
        let dataset = LipidDataset::from_records(&records(200));
        let trainer = Trainer::new(small_config());

        let (artifact, report) = trainer.fit_dataset(&dataset).unwrap();

        assert_eq!(report.n_train, 160);
        assert_eq!(report.n_test, 40);
        assert_eq!(artifact.forest.n_trees(), 10);
        assert!(report.metrics.mae.is_finite());
        assert!(report.metrics.r2 > 0.5, "R² too low: {}", report.metrics.r2);
        assert!(report.friedewald_mae < 5.0);

        let total: f64 = report.feature_importances.iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_metrics() {
        let dataset = LipidDataset::from_records(&records(120));
        let trainer = Trainer::new(small_config());

        let (_, a) = trainer.fit_dataset(&dataset).unwrap();
        let (_, b) = trainer.fit_dataset(&dataset).unwrap();

        assert_eq!(a.metrics.mae, b.metrics.mae);
        assert_eq!(a.metrics.r2, b.metrics.r2);
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let dataset = LipidDataset::from_records(&records(120));

        let (_, a) = Trainer::new(small_config().with_n_jobs(1)).fit_dataset(&dataset).unwrap();
        let (_, b) = Trainer::new(small_config().with_n_jobs(3)).fit_dataset(&dataset).unwrap();

        assert_eq!(a.metrics, b.metrics);
    }

    #[test]
    fn test_forest_knobs_flow_into_the_model() {
        let dataset = LipidDataset::from_records(&records(120));
        let config = TrainerConfig {
            max_depth: None,
            min_samples_split: 20,
            max_features: MaxFeatures::Sqrt,
            bootstrap: false,
            ..small_config()
        };

        let (artifact, report) = Trainer::new(config.clone()).fit_dataset(&dataset).unwrap();
        let forest = &artifact.forest;
        assert_eq!(forest.max_depth, None);
        assert_eq!(forest.min_samples_split, 20);
        assert_eq!(forest.max_features, MaxFeatures::Sqrt);
        assert!(!forest.bootstrap);
        assert!(report.metrics.mae.is_finite());

        let (_, again) = Trainer::new(config).fit_dataset(&dataset).unwrap();
        assert_eq!(report.metrics, again.metrics);
    }

    #[test]
    fn test_too_few_rows() {
        let dataset = LipidDataset::from_records(&records(1));
        let err = Trainer::new(small_config()).fit_dataset(&dataset).unwrap_err();
        assert!(matches!(err, LipidError::DataError(_)));
    }
}
