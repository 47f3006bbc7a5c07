//! OpenAI Speech Provider
//!
//! Implements `SpeechToText` using OpenAI Whisper.
//!
//! # Supported Audio Formats
//!
//! - mp3, mp4, mpeg, mpga, m4a, ogg, wav, webm, flac

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{audio_part, check_audio, map_status, require_key};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, Transcription};

/// OpenAI Whisper speech-to-text provider
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAISpeechProvider {
    /// Create a new OpenAI speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> Result<&str, SpeechError> {
        require_key(self.config.openai_api_key.as_deref(), "OpenAI")
    }

    /// Build the STT endpoint URL
    fn stt_url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }
}

/// OpenAI Whisper transcription response
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

#[async_trait]
impl SpeechToText for OpenAISpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        debug!("Transcribing audio with OpenAI Whisper");

        let api_key = self.api_key()?;
        check_audio(&audio, self.config.max_audio_bytes)?;

        let form = Form::new()
            .part("file", audio_part(audio)?)
            .text("model", self.config.stt_model.clone());

        let response = self
            .client
            .post(self.stt_url())
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Whisper transcription failed");
            return Err(map_status(status, &error_body));
        }

        let whisper_response: WhisperResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        debug!(
            text_len = whisper_response.text.len(),
            language = ?whisper_response.language,
            "Transcription complete"
        );

        let mut transcription = Transcription::new(whisper_response.text);

        if let Some(lang) = whisper_response.language {
            transcription = transcription.with_language(lang);
        }

        if let Some(duration) = whisper_response.duration {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let duration_ms = (duration * 1000.0) as u64;
            transcription = transcription.with_duration(duration_ms);
        }

        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        let Ok(api_key) = self.api_key() else {
            return false;
        };

        let models_url = format!("{}/models", self.config.openai_base_url.trim_end_matches('/'));

        match self
            .client
            .get(&models_url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI STT availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}
