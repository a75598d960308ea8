use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Failures surfaced while bootstrapping or running the service binary.
/// Workflow errors never reach this type; they are mapped to HTTP responses
/// by the per-area error enums.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
}
