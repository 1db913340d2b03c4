use thiserror::Error;

/// Configuration related errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid similarity threshold: {threshold} (expected 0-100)")]
    InvalidThreshold { threshold: u16 },

    #[error("Invalid comparison pool size: {size} (must be at least 1)")]
    InvalidPoolSize { size: usize },

    #[error("Invalid log level: {level}")]
    InvalidLogLevel { level: String },
}

/// Tab snapshot decoding errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed tab snapshot: {reason}")]
    Malformed { reason: String },
}

/// General system errors
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("IO error: {source}")]
    IO {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Runtime error: {details}")]
    Runtime { details: String },
}

/// Main error type for the workspace
///
/// The detection engine itself never fails; these surface only from
/// configuration loading and the host-facing integration layer.
#[derive(Debug, Error)]
pub enum TabDedupError {
    #[error("Configuration error: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },

    #[error("Snapshot error: {source}")]
    Snapshot {
        #[from]
        source: SnapshotError,
    },

    #[error("System error: {source}")]
    System {
        #[from]
        source: SystemError,
    },
}

impl From<std::io::Error> for TabDedupError {
    fn from(source: std::io::Error) -> Self {
        SystemError::from(source).into()
    }
}

impl From<serde_json::Error> for TabDedupError {
    fn from(source: serde_json::Error) -> Self {
        SystemError::from(source).into()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TabDedupError>;
