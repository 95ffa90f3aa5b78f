//! HTTP request handlers

use std::sync::Arc;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::data::{LipidFeatures, LipidUnits};
use crate::training::RegressionMetrics;

use super::error::Result;
use super::state::AppState;

/// Body of `POST /predict`
///
/// `HDL_C` is the wire name of the model's `HDL-C` column; the column name
/// itself is accepted too.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PredictRequest {
    #[serde(rename = "TC")]
    pub tc: f64,
    #[serde(rename = "HDL_C", alias = "HDL-C")]
    pub hdl_c: f64,
    #[serde(rename = "TG")]
    pub tg: f64,
}

impl From<PredictRequest> for LipidFeatures {
    fn from(req: PredictRequest) -> Self {
        LipidFeatures::new(req.tc, req.hdl_c, req.tg)
    }
}

/// Body of a successful prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "LDL-C")]
    pub ldl_c: f64,
}

/// Metadata of the loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub features: Vec<String>,
    pub target: String,
    pub units: LipidUnits,
    pub n_trees: usize,
    pub metrics: RegressionMetrics,
    pub feature_importances: Vec<(String, f64)>,
    pub trained_at: String,
    pub uptime_secs: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// Liveness
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "API is working" }))
}

/// Single-row LDL-C inference
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    let features = LipidFeatures::from(request);
    let ldl_c = state.predictor.predict(&features)?;
    Ok(Json(PredictResponse { ldl_c }))
}

/// Describe the loaded model
pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfo> {
    let artifact = state.predictor.artifact();
    Json(ModelInfo {
        model_path: state.config.model_path.display().to_string(),
        features: artifact.feature_names.clone(),
        target: artifact.target_name.clone(),
        units: artifact.units,
        n_trees: artifact.forest.n_trees(),
        metrics: artifact.metrics,
        feature_importances: artifact.feature_importances(),
        trained_at: artifact.trained_at.clone(),
        uptime_secs: state.uptime_secs(),
    })
}
