use thiserror::Error;

/// Error types for the control service
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Container runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Generic error: {0}")]
    Other(#[from] anyhow::Error),
}

impl ControlError {
    /// True when the container runtime could not be reached or enumerated.
    pub fn is_runtime_unavailable(&self) -> bool {
        matches!(self, ControlError::Runtime(RuntimeError::Unavailable { .. }))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at path: {path}")]
    FileNotFound { path: String },

    #[error("Invalid config format: {reason}")]
    InvalidFormat { reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Container runtime unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Container stop failed for {id}: {reason}")]
    StopFailed { id: String, reason: String },

    #[error("Container start failed for {id}: {reason}")]
    StartFailed { id: String, reason: String },
}

/// Convenience type alias for control service results
pub type Result<T, E = ControlError> = std::result::Result<T, E>;
