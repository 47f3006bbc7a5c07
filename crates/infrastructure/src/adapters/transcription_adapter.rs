//! Transcription adapter - Implements TranscriptionPort using ai_speech
//!
//! Provider errors never escape as errors: every failure becomes a
//! `TranscriptionResult::Failed` carrying a closed failure kind.

use std::{fmt, sync::Arc};

use ai_speech::{
    AudioData, AudioFormat, SpeechConfig, SpeechError, SpeechToText, create_provider,
};
use application::{
    error::ApplicationError,
    ports::{AudioClip, TranscriptionPort},
};
use async_trait::async_trait;
use domain::{TranscriptionFailureKind, TranscriptionResult};
use tracing::{debug, instrument, warn};

/// Adapter for the configured speech-to-text provider
pub struct SpeechTranscriptionAdapter {
    provider: Arc<dyn SpeechToText>,
}

impl fmt::Debug for SpeechTranscriptionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechTranscriptionAdapter")
            .field("model", &self.provider.model_name())
            .finish()
    }
}

impl SpeechTranscriptionAdapter {
    /// Create an adapter for the provider selected in `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid or the HTTP
    /// client cannot be built. Missing credentials are not checked here.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;
        let provider =
            create_provider(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { provider })
    }

    /// Wrap an existing provider
    pub fn from_provider(provider: Arc<dyn SpeechToText>) -> Self {
        Self { provider }
    }

    /// Classify a speech error into a failure kind
    const fn failure_kind(err: &SpeechError) -> TranscriptionFailureKind {
        match err {
            SpeechError::Configuration(_) => TranscriptionFailureKind::Configuration,
            SpeechError::Unauthorized(_) => TranscriptionFailureKind::Authentication,
            SpeechError::RateLimited => TranscriptionFailureKind::RateLimited,
            SpeechError::InvalidAudio(_) | SpeechError::AudioTooLarge { .. } => {
                TranscriptionFailureKind::InvalidAudio
            },
            SpeechError::InvalidResponse(_) => TranscriptionFailureKind::InvalidResponse,
            SpeechError::ConnectionFailed(_)
            | SpeechError::RequestFailed(_)
            | SpeechError::TranscriptionFailed(_)
            | SpeechError::Timeout(_) => TranscriptionFailureKind::Transport,
        }
    }
}

#[async_trait]
impl TranscriptionPort for SpeechTranscriptionAdapter {
    #[instrument(skip(self, clip), fields(
        audio_size = clip.len(),
        content_type = ?clip.content_type,
    ))]
    async fn transcribe(&self, clip: AudioClip) -> TranscriptionResult {
        if clip.is_empty() {
            debug!("Empty upload treated as silence");
            return TranscriptionResult::NoSpeech;
        }

        let format = AudioFormat::detect(clip.content_type.as_deref(), clip.file_name.as_deref());
        debug!(format = ?format, "Detected audio format");

        match self.provider.transcribe(AudioData::new(clip.data, format)).await {
            Ok(transcription) => {
                debug!(
                    transcript_len = transcription.text.len(),
                    language = ?transcription.language,
                    "Transcription complete"
                );
                TranscriptionResult::from_text(transcription.text)
            },
            Err(e) => {
                let kind = Self::failure_kind(&e);
                warn!(error = %e, %kind, "Transcription failed");
                TranscriptionResult::failed(kind, e.to_string())
            },
        }
    }

    async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }

    fn model_name(&self) -> String {
        self.provider.model_name().to_string()
    }
}
