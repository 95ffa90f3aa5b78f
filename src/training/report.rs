//! Training report and feature-importance chart

use crate::data::{CleaningReport, LipidUnits};
use super::metrics::RegressionMetrics;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub cleaning: CleaningReport,
    pub n_train: usize,
    pub n_test: usize,
    pub metrics: RegressionMetrics,
    /// MAE of the Friedewald estimate on the same test rows
    pub friedewald_mae: f64,
    pub units: LipidUnits,
    /// (feature, importance) in model input order
    pub feature_importances: Vec<(String, f64)>,
    pub artifact_path: Option<PathBuf>,
    pub training_time_secs: f64,
}

impl TrainingReport {
    /// Horizontal bars of the feature importances, ascending
    pub fn importance_chart(&self, max_width: usize) -> Vec<ImportanceBar> {
        importance_chart(&self.feature_importances, max_width)
    }
}

/// One bar of the importance chart
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceBar {
    pub feature: String,
    pub importance: f64,
    /// Bar length in cells
    pub width: usize,
}

impl ImportanceBar {
    pub fn bar(&self) -> String {
        "█".repeat(self.width)
    }
}

/// Sort importances ascending and scale them to at most `max_width` cells
pub fn importance_chart(importances: &[(String, f64)], max_width: usize) -> Vec<ImportanceBar> {
    let mut sorted: Vec<&(String, f64)> = importances.iter().collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let peak = sorted.last().map_or(0.0, |(_, v)| *v);

    sorted
        .into_iter()
        .map(|(feature, importance)| {
            let width = if peak > 0.0 {
                ((importance / peak) * max_width as f64).round() as usize
            } else {
                0
            };
            ImportanceBar {
                feature: feature.clone(),
                importance: *importance,
                width,
            }
        })
        .collect()
}
