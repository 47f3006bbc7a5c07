//! Configuration for the completion engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible completion endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the API (without `/chat/completions`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; requests fail with a configuration error when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature; kept low for classification
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Ask the provider for a JSON object response
    #[serde(default)]
    pub json_response_format: bool,

    /// Enable provider-side reasoning (OpenRouter `reasoning.enabled`)
    #[serde(default = "default_reasoning")]
    pub reasoning: bool,

    /// Value of the `HTTP-Referer` attribution header
    #[serde(default)]
    pub referer: Option<String>,

    /// Value of the `X-Title` attribution header
    #[serde(default = "default_app_title")]
    pub app_title: Option<String>,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-oss-safeguard-20b".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_reasoning() -> bool {
    true
}

#[allow(clippy::unnecessary_wraps)]
fn default_app_title() -> Option<String> {
    Some("RateGuard".to_string())
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: None,
            temperature: default_temperature(),
            json_response_format: false,
            reasoning: default_reasoning(),
            referer: None,
            app_title: default_app_title(),
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("json_response_format", &self.json_response_format)
            .field("reasoning", &self.reasoning)
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .finish()
    }
}

impl InferenceConfig {
    /// Config for OpenAI's own API with JSON-object responses
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: Some(api_key.into()),
            default_model: "gpt-4o-mini".to_string(),
            json_response_format: true,
            reasoning: false,
            app_title: None,
            ..Default::default()
        }
    }

    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
