//! Error types for Kaiwa
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Kaiwa operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, completion requests, and history persistence.
#[derive(Error, Debug)]
pub enum KaiwaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (upstream completion call failed)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for the completion provider
    ///
    /// Kept distinct from [`KaiwaError::Provider`]: a missing credential
    /// is a configuration failure and not retryable, while a provider
    /// error may be transient.
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// History storage errors (slot read/write, database open)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Kaiwa operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
