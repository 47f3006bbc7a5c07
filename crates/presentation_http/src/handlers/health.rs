//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub taxonomy: String,
    pub completion: ServiceStatus,
    pub transcription: ServiceStatus,
}

/// Status of a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
    pub model: String,
}

/// Readiness check - can the completion provider be reached?
///
/// Transcription availability is reported but does not gate readiness.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let classifier = &state.classifier;
    let (completion_healthy, transcription_healthy) =
        tokio::join!(classifier.is_healthy(), classifier.is_transcription_available());

    let status_code = if completion_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: completion_healthy,
            taxonomy: classifier.taxonomy().to_string(),
            completion: ServiceStatus {
                healthy: completion_healthy,
                model: classifier.completion_model(),
            },
            transcription: ServiceStatus {
                healthy: transcription_healthy,
                model: classifier.transcription_model(),
            },
        }),
    )
}
