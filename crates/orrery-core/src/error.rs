//! Error types for the orrery engine
//!
//! Physics queries never fail; these errors only arise where parameters enter
//! the engine from configuration or user input.

use thiserror::Error;

/// Result type for configuration-boundary operations
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Errors raised while validating or loading engine parameters
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("Invalid integrator settings: {0}")]
    InvalidIntegrator(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown climate profile: {0}")]
    UnknownCity(String),

    #[error("Unknown eclipse event: {0}")]
    UnknownEvent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
