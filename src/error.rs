//! Error types for COBA
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Maximum accepted upload size in bytes (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Main error type for COBA operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, attachment validation, request dispatch,
/// and response decoding.
#[derive(Error, Debug)]
pub enum CobaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failures (connection errors, non-2xx statuses)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upload exceeds the accepted size limit
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Actual size of the rejected upload in bytes
        size: u64,
        /// The configured size limit in bytes
        limit: u64,
    },

    /// A 2xx response body is missing the field the endpoint is
    /// contractually expected to return
    #[error("Malformed response from {endpoint}: missing field '{field}'")]
    MalformedResponse {
        /// The endpoint path that produced the response
        endpoint: String,
        /// The response field that was expected
        field: String,
    },

    /// Local file loading errors (unreadable upload path)
    #[error("File load error: {0}")]
    FileLoad(String),

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

/// Result type alias for COBA operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
