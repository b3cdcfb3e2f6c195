use std::io;
use thiserror::Error;

/// Error type for telemetry collection
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Telemetry provider error: {0}")]
    Provider(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("External process failed: {0}")]
    Process(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type alias for telemetry operations
pub type Result<T> = std::result::Result<T, TelemetryError>;

impl TelemetryError {
    /// Create a provider error
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        TelemetryError::Provider(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        TelemetryError::GpuNotAvailable(msg.into())
    }

    pub fn process<S: Into<String>>(msg: S) -> Self {
        TelemetryError::Process(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        TelemetryError::InvalidPath(msg.into())
    }
}
