//! Completion provider configuration.

use ai_core::InferenceConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Completion provider configuration as loaded from config sources
///
/// `base_url` stays unset unless configured so `OPENAI_BASE_URL` can fill
/// it before the built-in default applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceAppConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub default_model: String,

    /// Low by default; classification is not creative generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Ask for `response_format: json_object`
    #[serde(default)]
    pub json_response_format: bool,

    /// Request reasoning traces from models that support them
    #[serde(default = "default_reasoning")]
    pub reasoning: bool,

    /// `HTTP-Referer` attribution header
    #[serde(default)]
    pub referer: Option<String>,

    /// `X-Title` attribution header
    #[serde(default = "default_app_title")]
    pub app_title: Option<String>,
}

fn default_model() -> String {
    InferenceConfig::default().default_model
}

fn default_temperature() -> f32 {
    InferenceConfig::default().temperature
}

fn default_timeout_ms() -> u64 {
    InferenceConfig::default().timeout_ms
}

const fn default_reasoning() -> bool {
    true
}

fn default_app_title() -> Option<String> {
    InferenceConfig::default().app_title
}

impl Default for InferenceAppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            default_model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_ms: default_timeout_ms(),
            json_response_format: false,
            reasoning: default_reasoning(),
            referer: None,
            app_title: default_app_title(),
        }
    }
}

impl InferenceAppConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Client configuration for `ai_core`
    pub fn to_client_config(&self) -> InferenceConfig {
        let defaults = InferenceConfig::default();
        InferenceConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            default_model: self.default_model.clone(),
            timeout_ms: self.timeout_ms,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            json_response_format: self.json_response_format,
            reasoning: self.reasoning,
            referer: self.referer.clone(),
            app_title: self.app_title.clone(),
        }
    }
}
