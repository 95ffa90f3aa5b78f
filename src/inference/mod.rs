//! Inference module
//!
//! The persisted model artifact and the read-only predictor built from it.

mod artifact;
mod category;
mod predictor;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION, DEFAULT_ARTIFACT_PATH};
pub use category::LdlCategory;
pub use predictor::LdlPredictor;
