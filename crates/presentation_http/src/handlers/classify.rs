//! Text classification handler

use axum::{Json, extract::State};
use domain::{ClassificationRequest, ClassificationResult};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, validation::not_blank},
    state::AppState,
};

/// Body of `POST /classify`
#[derive(Debug, Deserialize, Validate)]
pub struct ClassifyRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Classify a text description
#[instrument(skip(state, body), fields(description_len = body.description.len()))]
pub async fn classify(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ClassifyRequest>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let request = ClassificationRequest::new(body.description)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .with_handle(body.handle)
        .with_platform(body.platform);

    let result = state.classifier.classify(&request).await?;
    Ok(Json(result))
}
