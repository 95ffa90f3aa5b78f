//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::LipidError;

/// Failures raised by handlers
///
/// Request validation and unknown routes are answered by the `Json`
/// extractor and the router fallbacks before a handler runs.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Inference error: {0}")]
    Inference(#[from] LipidError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Inference(e) => {
                tracing::error!(detail = %e, "Inference failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
