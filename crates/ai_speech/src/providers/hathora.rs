//! Hathora Speech Provider
//!
//! Uploads audio as multipart (`file`, `model`) to the configured Hathora
//! transcription endpoint. The endpoint has answered with either a `text` or
//! a `transcription` field; both shapes are normalized here.

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

/// Hathora hosted speech-to-text provider
#[derive(Debug, Clone)]
pub struct HathoraSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl HathoraSpeechProvider {
    /// Create a new Hathora speech provider
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

    fn endpoint(&self) -> Result<&str, SpeechError> {
        self.config
            .hathora_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| SpeechError::Configuration("Hathora URL not configured".to_string()))
    }
}

/// Transcript body; the service has used both field names
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HathoraResponse {
    Text { text: String },
    Transcription { transcription: String },
}

impl HathoraResponse {
    fn into_text(self) -> String {
        match self {
            Self::Text { text } => text,
            Self::Transcription { transcription } => transcription,
        }
    }
}

#[async_trait]
impl SpeechToText for HathoraSpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        debug!("Transcribing audio with Hathora");

        let api_key = require_key(self.config.hathora_api_key.as_deref(), "Hathora")?;
        let endpoint = self.endpoint()?;
        check_audio(&audio, self.config.max_audio_bytes)?;

        let form = Form::new()
            .part("file", audio_part(audio)?)
            .text("model", self.config.hathora_model.clone());

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Hathora transcription failed");
            return Err(map_status(status, &error_body));
        }

        let body: HathoraResponse = response.json().await.map_err(|e| {
            SpeechError::InvalidResponse(format!("Response has neither text nor transcription: {e}"))
        })?;
        let text = body.into_text();

        debug!(text_len = text.len(), "Transcription complete");

        Ok(Transcription::new(text))
    }

    async fn is_available(&self) -> bool {
        require_key(self.config.hathora_api_key.as_deref(), "Hathora").is_ok()
            && self.endpoint().is_ok()
    }

    fn model_name(&self) -> &str {
        &self.config.hathora_model
    }
}
