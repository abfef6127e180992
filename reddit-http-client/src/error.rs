//! Error types for the reddit HTTP client

use thiserror::Error;

/// A single entry from the API's `errors` array
///
/// The code is normalized (lowercased, underscores mapped to hyphens) so
/// `WRONG_PASSWORD` becomes `wrong-password`; the message is passed through
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorEntry {
    /// Normalized machine-readable error code
    pub code: String,
    /// Human-readable message as returned by the API
    pub message: String,
}

/// Errors that can occur when using the reddit HTTP client
#[derive(Error, Debug)]
pub enum RedditError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid HTTP status code received
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Malformed urlencoded input
    #[error("Failed to decode urlencoded input: {0}")]
    Decode(String),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API response envelope reported one or more errors
    ///
    /// All entries of the envelope's `errors` array are collected; the first
    /// entry is the primary one shown by `Display`.
    #[error("{}", api_summary(.errors))]
    Api {
        /// Every entry of the response's `errors` array, in order
        errors: Vec<ApiErrorEntry>,
    },

    /// Login response envelope was missing a required field
    #[error("Login response missing field: {0}")]
    MissingField(&'static str),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

fn api_summary(errors: &[ApiErrorEntry]) -> String {
    match errors {
        [] => "API error".to_string(),
        [first] => format!("API error {}: {}", first.code, first.message),
        [first, rest @ ..] => format!(
            "API error {}: {} (+{} more)",
            first.code,
            first.message,
            rest.len()
        ),
    }
}
