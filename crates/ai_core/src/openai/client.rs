//! OpenAI-compatible chat-completions client
//!
//! Works against any endpoint that speaks `POST {base_url}/chat/completions`
//! with bearer authentication (OpenRouter, OpenAI, self-hosted gateways).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

/// Completion engine for OpenAI-compatible APIs
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleEngine {
    client: Client,
    config: InferenceConfig,
}

impl OpenAiCompatibleEngine {
    /// Create a new engine
    ///
    /// A missing API key is not an error here; it surfaces as
    /// `InferenceError::Configuration` on the first request.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                InferenceError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            has_api_key = config.has_api_key(),
            "Initialized completion engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn api_key(&self) -> Result<&str, InferenceError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InferenceError::Configuration("API key not configured".to_string()))
    }

    /// Attach attribution headers used by OpenRouter rankings
    fn with_attribution(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.config.referer {
            Some(referer) => builder.header("HTTP-Referer", referer),
            None => builder,
        };
        match &self.config.app_title {
            Some(title) => builder.header("X-Title", title),
            None => builder,
        }
    }

    /// Map a non-success status onto the closed error set
    fn map_status(status: StatusCode, body: &str) -> InferenceError {
        let message = serde_json::from_str::<ApiError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InferenceError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            _ => InferenceError::ServerError(format!("Status {status}: {message}")),
        }
    }
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<ReasoningOptions>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ReasoningOptions {
    enabled: bool,
}

/// Chat-completions response envelope
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
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

#[async_trait]
impl InferenceEngine for OpenAiCompatibleEngine {
    #[instrument(skip(self, request), fields(model = %self.config.default_model))]
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let api_key = self.api_key()?;
        let model = self.config.default_model.as_str();
        let json_response = self.config.json_response_format;

        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: json_response.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            reasoning: self
                .config
                .reasoning
                .then_some(ReasoningOptions { enabled: true }),
        };

        debug!(
            messages = request.messages.len(),
            json_response, "Sending chat completion request"
        );

        let response = self
            .with_attribution(self.client.post(self.api_url("chat/completions")))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Completion request failed");
            return Err(Self::map_status(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let model_name = completion.model.unwrap_or_else(|| model.to_string());
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("No choices in response".to_string()))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            content_len = content.len(),
            tokens = ?completion.usage,
            "Completion received"
        );

        Ok(InferenceResponse {
            content,
            model: model_name,
            usage: completion.usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let Ok(api_key) = self.api_key() else {
            return Ok(false);
        };

        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
