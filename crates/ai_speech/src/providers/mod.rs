//! Speech processing provider implementations
//!
//! Contains concrete implementations of the `SpeechToText` trait and the
//! request/response handling they share.

pub mod hathora;
pub mod openai;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::multipart::Part;
use serde::Deserialize;

pub use hathora::HathoraSpeechProvider;
pub use openai::OpenAISpeechProvider;

use crate::config::{SpeechConfig, SpeechProvider};
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::AudioData;

/// Build the provider selected by `config.provider`
///
/// # Errors
///
/// Returns `SpeechError::Configuration` if the configuration is invalid.
pub fn create_provider(config: SpeechConfig) -> Result<Arc<dyn SpeechToText>, SpeechError> {
    Ok(match config.provider {
        SpeechProvider::OpenAI => Arc::new(OpenAISpeechProvider::new(config)?),
        SpeechProvider::Hathora => Arc::new(HathoraSpeechProvider::new(config)?),
    })
}

/// Reject empty or oversized audio before any network call
fn check_audio(audio: &AudioData, max_bytes: usize) -> Result<(), SpeechError> {
    if audio.is_empty() {
        return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
    }
    if audio.size_bytes() > max_bytes {
        return Err(SpeechError::AudioTooLarge {
            size_bytes: audio.size_bytes(),
            max_bytes,
        });
    }
    Ok(())
}

/// Build the multipart file part for an upload
fn audio_part(audio: AudioData) -> Result<Part, SpeechError> {
    let filename = audio.filename("audio");
    let mime_type = audio.mime_type();

    Part::bytes(audio.into_data())
        .file_name(filename)
        .mime_str(mime_type)
        .map_err(|e| SpeechError::InvalidAudio(format!("Invalid MIME type: {e}")))
}

/// Return the key if configured and non-blank
fn require_key<'a>(key: Option<&'a str>, provider: &str) -> Result<&'a str, SpeechError> {
    key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
        SpeechError::Configuration(format!("{provider} API key not configured"))
    })
}

/// OpenAI-style API error body
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Map a non-success status onto the closed error set
fn map_status(status: StatusCode, body: &str) -> SpeechError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}: {body}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SpeechError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited,
        StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            SpeechError::InvalidAudio(message)
        },
        _ => SpeechError::TranscriptionFailed(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;

    #[test]
    fn check_audio_rejects_empty() {
        let audio = AudioData::new(vec![], AudioFormat::Webm);
        assert!(matches!(check_audio(&audio, 10), Err(SpeechError::InvalidAudio(_))));
    }

    #[test]
    fn check_audio_rejects_oversized() {
        let audio = AudioData::new(vec![0; 11], AudioFormat::Webm);
        assert!(matches!(
            check_audio(&audio, 10),
            Err(SpeechError::AudioTooLarge {
                size_bytes: 11,
                max_bytes: 10
            })
        ));
    }

    #[test]
    fn map_status_variants() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, ""),
            SpeechError::Unauthorized(_)
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            SpeechError::RateLimited
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, ""),
            SpeechError::InvalidAudio(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, "oops"),
            SpeechError::TranscriptionFailed(_)
        ));
    }

    #[test]
    fn map_status_reads_api_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        match map_status(StatusCode::UNAUTHORIZED, body) {
            SpeechError::Unauthorized(message) => assert_eq!(message, "Incorrect API key provided"),
            other => unreachable!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn require_key_rejects_blank() {
        assert!(require_key(None, "OpenAI").is_err());
        assert!(require_key(Some(" "), "OpenAI").is_err());
        assert_eq!(require_key(Some("k"), "OpenAI").unwrap(), "k");
    }

    #[test]
    fn create_provider_follows_config() {
        let provider = create_provider(SpeechConfig::test()).unwrap();
        assert_eq!(provider.model_name(), "whisper-1");

        let config = SpeechConfig {
            provider: SpeechProvider::Hathora,
            ..SpeechConfig::test()
        };
        let provider = create_provider(config).unwrap();
        assert_eq!(provider.model_name(), "parakeet");
    }
}
