//! Transcription provider errors

use thiserror::Error;

/// Why a provider could not turn a clip into text
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Transport error that was neither a connect failure nor a timeout
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// HTTP 401 or 403 from the provider
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Empty clip, or one the provider refused to decode
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Clip over `max_audio_bytes`; never sent upstream
    #[error("Audio too large: {size_bytes} bytes exceeds maximum of {max_bytes} bytes")]
    AudioTooLarge { size_bytes: usize, max_bytes: usize },

    /// Any other non-success status
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Success status with a body that carries no transcript
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimited,

    /// Missing key or URL for the selected provider
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Classify a reqwest failure, reporting the configured timeout
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
