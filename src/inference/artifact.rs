//! Serialized model artifact

use crate::data::{LipidUnits, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::error::{LipidError, Result};
use crate::training::{RandomForest, RegressionMetrics};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default artifact location
///
/// Stands in for `final_lipid_model.pkl`: the file holds bincode, not a
/// pickle, so it carries a `.bin` extension.
pub const DEFAULT_ARTIFACT_PATH: &str = "final_lipid_model.bin";

/// Bumped whenever the serialized layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// A fitted forest plus what is needed to serve it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Input columns in model order
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub units: LipidUnits,
    /// Held-out metrics from training
    pub metrics: RegressionMetrics,
    /// RFC 3339 training timestamp
    pub trained_at: String,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, metrics: RegressionMetrics, units: LipidUnits) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            target_name: TARGET_COLUMN.to_string(),
            units,
            metrics,
            trained_at: chrono::Utc::now().to_rfc3339(),
            forest,
        }
    }

    /// Write the artifact, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = bincode::serialize(self)?;
        fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Model artifact written");
        Ok(())
    }

    /// Read and validate an artifact
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let artifact: Self = bincode::deserialize(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(LipidError::IncompatibleArtifact(format!(
                "format version {} (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }

        if self.feature_names != FEATURE_COLUMNS {
            return Err(LipidError::IncompatibleArtifact(format!(
                "features {:?} (expected {:?})",
                self.feature_names, FEATURE_COLUMNS
            )));
        }

        if self.forest.n_trees() == 0 {
            return Err(LipidError::ModelNotFitted);
        }

        if self.forest.n_features() != self.feature_names.len() {
            return Err(LipidError::IncompatibleArtifact(format!(
                "forest expects {} features, artifact lists {}",
                self.forest.n_features(),
                self.feature_names.len()
            )));
        }

        Ok(())
    }

    /// (feature, importance) pairs in model order
    pub fn feature_importances(&self) -> Vec<(String, f64)> {
        let importances = self.forest.feature_importances().unwrap_or(&[]);
        self.feature_names
            .iter()
            .cloned()
            .zip(importances.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn fitted_artifact() -> ModelArtifact {
        let x = Array2::from_shape_fn((60, 3), |(i, j)| (100 + i * (j + 1)) as f64);
        let y = Array1::from_shape_fn(60, |i| x[[i, 0]] - x[[i, 1]] - x[[i, 2]] / 5.0);
        let mut forest = RandomForest::new(5).with_random_state(42);
        forest.fit(&x, &y).unwrap();
        ModelArtifact::new(forest, RegressionMetrics::default(), LipidUnits::MgDl)
    }

    #[test]
    fn test_save_load_preserves_predictions() {
        let artifact = fitted_artifact();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        artifact.save(&path).unwrap();
        let loaded = ModelArtifact::load(&path).unwrap();

        let row = ndarray::array![180.0, 45.0, 120.0];
        assert_eq!(
            artifact.forest.predict_row(row.view()).unwrap(),
            loaded.forest.predict_row(row.view()).unwrap()
        );
        assert_eq!(loaded.feature_names, vec!["TC", "HDL-C", "TG"]);
        assert_eq!(loaded.target_name, "LDL-C");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, b"stale").unwrap();

        fitted_artifact().save(&path).unwrap();
        assert!(ModelArtifact::load(&path).is_ok());
    }

    #[test]
    fn test_corrupt_artifact() {
        let err = ModelArtifact::from_bytes(b"definitely not a model").unwrap_err();
        assert!(matches!(err, LipidError::SerializationError(_)));
    }

    #[test]
    fn test_version_mismatch() {
        let mut artifact = fitted_artifact();
        artifact.format_version = 99;
        let bytes = bincode::serialize(&artifact).unwrap();
        let err = ModelArtifact::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, LipidError::IncompatibleArtifact(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ModelArtifact::load("/nonexistent/final_lipid_model.bin").unwrap_err();
        assert!(matches!(err, LipidError::IoError(_)));
    }
}
