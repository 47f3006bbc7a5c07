//! Batch classification handler

use application::{BatchEntry, BatchReport};
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Body of `POST /classify-batch`
///
/// Entries stay raw JSON here so a malformed record fails only its own slot.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchRequest {
    #[serde(default)]
    pub influencers: Option<Vec<Value>>,
}

/// Classify a list of records sequentially
#[instrument(skip(state, body))]
pub async fn classify_batch(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<BatchRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    let records = body
        .influencers
        .ok_or_else(|| ApiError::BadRequest("Influencers array is required".to_string()))?;

    let max = state.config.classifier.max_batch_size;
    if records.len() > max {
        return Err(ApiError::BadRequest(format!(
            "Batch of {} records exceeds the maximum of {max}",
            records.len()
        )));
    }

    let entries: Vec<BatchEntry> = records.into_iter().map(BatchEntry::from_json).collect();
    let report = state.batch.classify_batch(entries).await?;
    Ok(Json(report))
}
