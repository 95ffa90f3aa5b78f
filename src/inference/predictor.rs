//! Read-only predictor over a loaded artifact

use crate::data::LipidFeatures;
use crate::error::{LipidError, Result};
use super::artifact::ModelArtifact;
use ndarray::Array1;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Shared, immutable LDL-C predictor
///
/// Cloning is cheap; every clone reads the same artifact.
#[derive(Clone)]
pub struct LdlPredictor {
    artifact: Arc<ModelArtifact>,
}

impl std::fmt::Debug for LdlPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LdlPredictor")
            .field("features", &self.artifact.feature_names)
            .field("n_trees", &self.artifact.forest.n_trees())
            .field("trained_at", &self.artifact.trained_at)
            .finish()
    }
}

impl LdlPredictor {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    /// Load an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        ModelArtifact::load(path).map(Self::new)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Predict LDL-C for one panel
    pub fn predict(&self, features: &LipidFeatures) -> Result<f64> {
        let row = self
            .artifact
            .feature_names
            .iter()
            .map(|name| {
                features
                    .get(name)
                    .ok_or_else(|| LipidError::FeatureNotFound(name.clone()))
            })
            .collect::<Result<Array1<f64>>>()?;

        let value = self.artifact.forest.predict_row(row.view())?;
        if !value.is_finite() {
            return Err(LipidError::InferenceError(format!(
                "model produced a non-finite prediction: {}",
                value
            )));
        }

        debug!(tc = features.tc, hdl_c = features.hdl_c, tg = features.tg, ldl_c = value, "Prediction");
        Ok(value)
    }
}
