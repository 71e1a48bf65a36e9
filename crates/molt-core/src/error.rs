//! Unified error types for Moltbot

use thiserror::Error;

/// Unified error type for all Moltbot operations
#[derive(Error, Debug)]
pub enum MoltError {
    // Provider errors
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Registration failed: {0}")]
    Registration(String),

    // Local errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using MoltError
pub type Result<T> = std::result::Result<T, MoltError>;
