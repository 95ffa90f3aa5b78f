//! Application state

use crate::inference::LdlPredictor;

use super::ServerConfig;

/// State shared across handlers
///
/// Built once at startup and never mutated, so handlers read it without locks.
pub struct AppState {
    pub config: ServerConfig,
    pub predictor: LdlPredictor,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig, predictor: LdlPredictor) -> Self {
        Self {
            config,
            predictor,
            started_at: chrono::Utc::now(),
        }
    }

    /// Seconds since the state was built
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
