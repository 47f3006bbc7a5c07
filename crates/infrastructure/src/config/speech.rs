//! Speech-to-text provider configuration.

use ai_speech::{SpeechConfig, SpeechProvider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Speech-to-text configuration as loaded from config sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechAppConfig {
    /// Which provider transcribes uploads
    #[serde(default)]
    pub provider: SpeechProvider,

    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<SecretString>,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    #[serde(default, skip_serializing)]
    pub hathora_api_key: Option<SecretString>,

    /// Full transcription endpoint URL; required for the Hathora provider
    #[serde(default)]
    pub hathora_url: Option<String>,

    #[serde(default = "default_hathora_model")]
    pub hathora_model: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Uploads above this size fail transcription without a provider call
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

fn default_openai_base_url() -> String {
    SpeechConfig::default().openai_base_url
}

fn default_stt_model() -> String {
    SpeechConfig::default().stt_model
}

fn default_hathora_model() -> String {
    SpeechConfig::default().hathora_model
}

fn default_timeout_ms() -> u64 {
    SpeechConfig::default().timeout_ms
}

fn default_max_audio_bytes() -> usize {
    SpeechConfig::default().max_audio_bytes
}

impl Default for SpeechAppConfig {
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

impl SpeechAppConfig {
    /// Whether the selected provider has a non-blank key
    pub fn has_api_key(&self) -> bool {
        let key = match self.provider {
            SpeechProvider::OpenAI => self.openai_api_key.as_ref(),
            SpeechProvider::Hathora => self.hathora_api_key.as_ref(),
        };
        key.is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Client configuration for `ai_speech`
    pub fn to_client_config(&self) -> SpeechConfig {
        SpeechConfig {
            provider: self.provider,
            openai_api_key: expose(self.openai_api_key.as_ref()),
            openai_base_url: self.openai_base_url.clone(),
            stt_model: self.stt_model.clone(),
            hathora_api_key: expose(self.hathora_api_key.as_ref()),
            hathora_url: self.hathora_url.clone(),
            hathora_model: self.hathora_model.clone(),
            timeout_ms: self.timeout_ms,
            max_audio_bytes: self.max_audio_bytes,
        }
    }
}

fn expose(secret: Option<&SecretString>) -> Option<String> {
    secret.map(|s| s.expose_secret().to_string())
}
