/*
[INPUT]:  Error sources (HTTP, API, serialization, configuration)
[OUTPUT]: Structured error types with network-failure classification
[POS]:    Error handling layer - unified HTTP error type for the crate
[UPDATE]: When adding new error sources or changing degradation rules
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the DEX backend client
#[derive(Error, Debug)]
pub enum DexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected locally before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request did not complete in time
    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

impl DexError {
    /// True when the backend could not be reached at all.
    ///
    /// Connect failures cover refused connections, DNS resolution and TLS
    /// handshake errors. Timeouts count as well. A response that arrived
    /// (any status, any body) is never a network failure.
    pub fn is_network_failure(&self) -> bool {
        match self {
            DexError::Http(err) => err.is_connect() || err.is_timeout(),
            DexError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Message suitable for showing to a user.
    ///
    /// API errors surface the backend's own text.
    pub fn user_message(&self) -> String {
        match self {
            DexError::Api { message, .. } => message.clone(),
            DexError::InvalidRequest(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        DexError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for DEX client operations
pub type Result<T> = std::result::Result<T, DexError>;
