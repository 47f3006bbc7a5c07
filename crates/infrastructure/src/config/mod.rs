//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `classifier`: taxonomy, guideline override, batch limits
//! - `inference`: completion provider
//! - `speech`: speech-to-text provider
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`,
//! then `RATEGUARD_*` environment variables (`__` separates nested keys,
//! e.g. `RATEGUARD_SERVER__PORT`). Credentials missing after that are taken
//! from the conventional provider variables.

mod classifier;
mod inference;
mod server;
mod speech;

use std::path::Path;

use ai_speech::SpeechProvider;
use application::{ApplicationError, GuidelineTemplate};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use classifier::ClassifierConfig;
pub use inference::InferenceAppConfig;
pub use server::ServerConfig;
pub use speech::SpeechAppConfig;

/// Prefix of service-specific environment variables
pub const ENV_PREFIX: &str = "RATEGUARD";

/// Conventional credential variables consulted after the layered config
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const OPENAI_API_KEY_WHISPER: &str = "OPENAI_API_KEY_WHISPER";
pub const HATHORA_API_KEY: &str = "HATHORA_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Taxonomy and guideline selection
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub inference: InferenceAppConfig,

    /// Speech-to-text configuration
    #[serde(default)]
    pub speech: SpeechAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// Conventional credential variables are applied afterwards.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config = Self::load_from(config::File::with_name("config").required(false))?;
        config.apply_credentials_from(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load with `file` as the file layer, environment overriding it
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Fill credentials that are still unset from `lookup`
    ///
    /// Existing values are never overridden. The Whisper key falls back to
    /// the general OpenAI key.
    pub fn apply_credentials_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.inference.api_key.is_none() {
            if let Some(key) = non_blank(OPENAI_API_KEY) {
                self.inference.api_key = Some(SecretString::from(key));
                debug!("Loaded inference.api_key from {OPENAI_API_KEY}");
            }
        }
        if self.inference.base_url.is_none() {
            if let Some(url) = non_blank(OPENAI_BASE_URL) {
                debug!(base_url = %url, "Loaded inference.base_url from {OPENAI_BASE_URL}");
                self.inference.base_url = Some(url);
            }
        }
        if self.speech.openai_api_key.is_none() {
            let key = non_blank(OPENAI_API_KEY_WHISPER).or_else(|| non_blank(OPENAI_API_KEY));
            if let Some(key) = key {
                self.speech.openai_api_key = Some(SecretString::from(key));
                debug!("Loaded speech.openai_api_key from environment");
            }
        }
        if self.speech.hathora_api_key.is_none() {
            if let Some(key) = non_blank(HATHORA_API_KEY) {
                self.speech.hathora_api_key = Some(SecretString::from(key));
                debug!("Loaded speech.hathora_api_key from {HATHORA_API_KEY}");
            }
        }
    }

    /// Check value ranges; credentials are checked per request instead
    pub fn validate(&self) -> Result<(), String> {
        if self.classifier.max_batch_size == 0 {
            return Err("classifier.max_batch_size must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.inference.temperature) {
            return Err(format!(
                "inference.temperature must be within 0.0-2.0, got {}",
                self.inference.temperature
            ));
        }
        if self.inference.timeout_ms == 0 {
            return Err("inference.timeout_ms must be greater than 0".to_string());
        }
        if self.speech.provider == SpeechProvider::Hathora && self.speech.hathora_url.is_none() {
            return Err("speech.hathora_url is required for the hathora provider".to_string());
        }
        self.speech
            .to_client_config()
            .validate()
            .map_err(|e| format!("speech: {e}"))
    }

    /// Names of credentials the configured providers will need but lack
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.inference.has_api_key() {
            missing.push("inference.api_key");
        }
        if !self.speech.has_api_key() {
            missing.push(match self.speech.provider {
                SpeechProvider::OpenAI => "speech.openai_api_key",
                SpeechProvider::Hathora => "speech.hathora_api_key",
            });
        }
        missing
    }

    /// Guideline template for the configured taxonomy
    ///
    /// Uses `classifier.guidelines_path` when set, the built-in template
    /// otherwise.
    pub fn guideline_template(&self) -> Result<GuidelineTemplate, ApplicationError> {
        let taxonomy = self.classifier.taxonomy;
        match &self.classifier.guidelines_path {
            Some(path) => load_guidelines(taxonomy, path),
            None => Ok(GuidelineTemplate::builtin(taxonomy)),
        }
    }
}

fn load_guidelines(
    taxonomy: domain::RatingTaxonomy,
    path: &Path,
) -> Result<GuidelineTemplate, ApplicationError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ApplicationError::Configuration(format!(
            "Failed to read guidelines from {}: {e}",
            path.display()
        ))
    })?;
    if text.trim().is_empty() {
        return Err(ApplicationError::Configuration(format!(
            "Guidelines file {} is empty",
            path.display()
        )));
    }

    let version = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("custom")
        .to_string();
    info!(path = %path.display(), %version, "Loaded custom guidelines");
    Ok(GuidelineTemplate::custom(taxonomy, version, text))
}
