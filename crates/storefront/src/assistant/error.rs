//! Assistant bridge error types.

use thiserror::Error;

/// Errors that can occur when calling the generation API.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a structured error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Machine-readable error type.
        error_type: String,
        /// Human-readable message.
        message: String,
    },

    /// Response could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limited.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The reply contained no text.
    #[error("empty reply from generation API")]
    EmptyReply,
}
