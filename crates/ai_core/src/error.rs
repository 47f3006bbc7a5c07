//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
///
/// Adapters map HTTP status codes onto this closed set once, so callers
/// never inspect raw status numbers.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Provider rejected the credentials (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Server returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response envelope could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Missing or invalid configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Map a reqwest transport error, reporting the configured timeout
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Whether the error came from the network path rather than the provider's answer
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::RequestFailed(_)
        )
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_transport(&err, 30000)
    }
}
