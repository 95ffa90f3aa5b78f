//! LipidAI - LDL cholesterol estimation
//!
//! Estimates LDL-C from a standard lipid panel (total cholesterol, HDL-C and
//! triglycerides) with a random-forest regressor:
//! - Tolerant CSV loading with numeric coercion and row filtering
//! - Seeded train/test split, forest fitting and MAE / R² evaluation
//! - A versioned model artifact
//! - An HTTP prediction service and a CLI
//!
//! # Modules
//!
//! - [`data`] - Dataset loading and cleaning
//! - [`training`] - Regression trees, random forest and the training pipeline
//! - [`inference`] - Model artifact, predictor and LDL-C reference ranges
//! - [`server`] - HTTP server with REST API
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Core ML modules
pub mod data;
pub mod training;
pub mod inference;

// Services
pub mod server;
pub mod cli;

pub use error::{LipidError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{LipidError, Result};

    // Data
    pub use crate::data::{DatasetLoader, LipidDataset, LipidFeatures, LipidUnits, FEATURE_COLUMNS, TARGET_COLUMN};

    // Training
    pub use crate::training::{RandomForest, RegressionMetrics, Trainer, TrainerConfig, TrainingReport};

    // Inference
    pub use crate::inference::{LdlCategory, LdlPredictor, ModelArtifact};

    // Server
    pub use crate::server::{create_router, run_server, AppState, ServerConfig};
}
