//! Error types for LipidAI

use thiserror::Error;

/// Result type alias for LipidAI operations
pub type Result<T> = std::result::Result<T, LipidError>;

/// Main error type for the trainer and the predictor
#[derive(Error, Debug)]
pub enum LipidError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Column not found: {0}")]
    FeatureNotFound(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Incompatible model artifact: {0}")]
    IncompatibleArtifact(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for LipidError {
    fn from(err: polars::error::PolarsError) -> Self {
        LipidError::DataError(err.to_string())
    }
}

impl From<bincode::Error> for LipidError {
    fn from(err: bincode::Error) -> Self {
        LipidError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for LipidError {
    fn from(err: ndarray::ShapeError) -> Self {
        LipidError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
