//! Configuration for speech processing

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for speech-to-text services
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// OpenAI API key (for OpenAI provider)
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (Whisper is not served by OpenRouter)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Speech-to-text model for the OpenAI provider
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Hathora API key (for Hathora provider)
    #[serde(default, skip_serializing)]
    pub hathora_api_key: Option<String>,

    /// Full URL of the Hathora transcription endpoint
    #[serde(default)]
    pub hathora_url: Option<String>,

    /// Speech-to-text model for the Hathora provider
    #[serde(default = "default_hathora_model")]
    pub hathora_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum accepted audio payload in bytes
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

/// Speech provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// OpenAI Whisper
    #[default]
    OpenAI,
    /// Hathora hosted STT
    Hathora,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_hathora_model() -> String {
    "parakeet".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_audio_bytes() -> usize {
    25 * 1024 * 1024 // Whisper upload limit
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            stt_model: default_stt_model(),
            hathora_api_key: None,
            hathora_url: None,
            hathora_model: default_hathora_model(),
            timeout_ms: default_timeout_ms(),
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("provider", &self.provider)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("openai_base_url", &self.openai_base_url)
            .field("stt_model", &self.stt_model)
            .field("hathora_api_key", &self.hathora_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("hathora_url", &self.hathora_url)
            .field("hathora_model", &self.hathora_model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_audio_bytes", &self.max_audio_bytes)
            .finish()
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            openai_api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// Credentials are not checked here; a missing key surfaces per request
    /// as `SpeechError::Configuration` so the service can still start.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_audio_bytes == 0 {
            return Err("Max audio size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Model name of the selected provider
    #[must_use]
    pub fn active_model(&self) -> &str {
        match self.provider {
            SpeechProvider::OpenAI => &self.stt_model,
            SpeechProvider::Hathora => &self.hathora_model,
        }
    }
}
