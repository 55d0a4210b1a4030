//! Error types for Autotask API operations.

use thiserror::Error;

/// Errors that can occur while building queries or talking to the Autotask API.
#[derive(Debug, Error)]
pub enum AutotaskError {
    /// Configuration is missing or incomplete.
    #[error("Autotask configuration required: {0}")]
    ConfigMissing(String),

    /// An argument was outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operator is not one of the recognized filter operators.
    #[error("Invalid operator '{0}'")]
    InvalidOperator(String),

    /// Conjunction is neither AND nor OR.
    #[error("Invalid conjunction '{0}': expected AND or OR")]
    InvalidConjunction(String),

    /// Response body did not contain the expected container key.
    #[error("Malformed response: missing '{key}' key")]
    MalformedResponse { key: &'static str },

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed.
    #[error("Autotask API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Autotask operations.
pub type Result<T> = core::result::Result<T, AutotaskError>;
