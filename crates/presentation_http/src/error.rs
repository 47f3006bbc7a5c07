//! API error handling
//!
//! Every error response carries `{error, code, details?}`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Provider rejected our credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Provider rate limit hit
    #[error("Rate limited")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Server-side problem, including missing provider credentials
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match self {
            Self::BadRequest(msg) => ("bad_request", msg, None),
            Self::Unauthorized(msg) => ("unauthorized", "Invalid API key".to_string(), Some(msg)),
            Self::RateLimited => (
                "rate_limited",
                "Rate limit exceeded. Please try again later.".to_string(),
                None,
            ),
            Self::ServiceUnavailable(msg) => (
                "service_unavailable",
                "Service temporarily unavailable".to_string(),
                Some(msg),
            ),
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed with internal error");
                ("internal_error", "An internal error occurred".to_string(), Some(msg))
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::NotAuthorized(msg) => Self::Unauthorized(msg),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) => Self::Internal(msg),
        }
    }
}
