//! Completion adapter - Implements CompletionPort using ai_core

use ai_core::{
    InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAiCompatibleEngine,
};
use application::{
    error::ApplicationError,
    ports::{CompletionPort, PromptPair},
};
use async_trait::async_trait;
use domain::RawModelOutput;
use tracing::{debug, instrument, warn};

/// Adapter for OpenAI-compatible chat-completion providers
#[derive(Debug)]
pub struct OpenAiCompletionAdapter {
    engine: OpenAiCompatibleEngine,
}

impl OpenAiCompletionAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiCompatibleEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    ///
    /// Auth, rate-limit and configuration problems keep their identity; every
    /// other failure is a transport-level external service error.
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::Unauthorized(msg) => ApplicationError::NotAuthorized(msg),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionPort for OpenAiCompletionAdapter {
    #[instrument(skip(self, prompt), fields(
        model = %self.engine.default_model(),
        system_len = prompt.system.len(),
        user_len = prompt.user.len(),
    ))]
    async fn complete(&self, prompt: &PromptPair) -> Result<RawModelOutput, ApplicationError> {
        let request = InferenceRequest::with_system(&prompt.system, &prompt.user);

        let response = self.engine.generate(request).await.map_err(|e| {
            warn!(error = %e, "Completion request failed");
            Self::map_error(e)
        })?;

        debug!(
            reply_len = response.content.len(),
            finish_reason = ?response.finish_reason,
            "Completion received"
        );

        let model = if response.model.is_empty() {
            self.engine.default_model().to_string()
        } else {
            response.model
        };
        Ok(RawModelOutput::new(response.content, model))
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Completion provider health check failed");
                false
            },
        }
    }

    fn model_name(&self) -> String {
        self.engine.default_model().to_string()
    }
}
