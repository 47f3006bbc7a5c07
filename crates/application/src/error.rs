//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (e.g. empty description)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Required provider configuration is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider rejected our credentials
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Provider rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Transport failure, non-2xx status or malformed provider envelope
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl ApplicationError {
    /// Whether a classification should absorb this error into a
    /// conservative fallback result instead of failing the request
    pub const fn degrades_to_fallback(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
