//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A label that names no rating tier
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// A category score outside the 0-3 scale
    #[error("Invalid score for {category}: {value}")]
    InvalidScore { category: String, value: String },
}

impl DomainError {
    /// Create an invalid score error
    pub fn invalid_score(category: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidScore {
            category: category.into(),
            value: value.to_string(),
        }
    }
}
