//! Completion port - Interface for chat-completion providers

use async_trait::async_trait;
use domain::RawModelOutput;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Instruction and user text sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// System/developer instruction (the guideline template)
    pub system: String,
    /// User message embedding the caller's fields
    pub user: String,
}

/// Port for chat-completion operations
///
/// Implementations map provider failures onto `ApplicationError` variants:
/// credentials rejected → `NotAuthorized`, rate limit → `RateLimited`,
/// missing key → `Configuration`, everything else → `ExternalService`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send one prompt and return the raw reply text; never retries
    async fn complete(&self, prompt: &PromptPair) -> Result<RawModelOutput, ApplicationError>;

    /// Check if the completion backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Model identifier used for requests
    fn model_name(&self) -> String;
}
