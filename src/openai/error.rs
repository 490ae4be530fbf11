//! Error types for the chat completion client

use thiserror::Error;

/// Errors that can occur when calling the generative-text service
#[derive(Error, Debug)]
pub enum OpenAiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The API answered with a non-success status
    #[error("API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response carried no message content
    #[error("response contained no message content")]
    EmptyResponse,
}

/// Result type for chat completion operations
pub type OpenAiResult<T> = Result<T, OpenAiError>;
