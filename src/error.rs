//! Error types for the mission control monitor
//!
//! This module provides structured error definitions using thiserror and
//! accepts anyhow errors from listener callbacks and binaries.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for mission control operations
#[derive(Error, Debug)]
pub enum MissionControlError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML rendering error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Unknown event kind name
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    /// Mission, subgoal, agent or trace node not present in the catalog
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for mission control operations
pub type Result<T> = std::result::Result<T, MissionControlError>;

/// Convert anyhow::Error to MissionControlError
impl From<anyhow::Error> for MissionControlError {
    fn from(err: anyhow::Error) -> Self {
        MissionControlError::Other(err.to_string())
    }
}
