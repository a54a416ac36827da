//! API Errors

use thiserror::Error;

const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,

        /// `message` from the error body, when it had one.
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot have paths appended.
    #[error("invalid api url: {0}")]
    BaseUrl(String),

    /// A request body could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text to show the user: the server's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message,
            _ => FALLBACK_MESSAGE,
        }
    }

    /// Whether the backend reported the record as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
