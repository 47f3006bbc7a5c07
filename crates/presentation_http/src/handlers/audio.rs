//! Audio classification handler
//!
//! Accepts a multipart upload with an `audio` file part and optional
//! `handle` and `platform` text parts.

use application::{AudioClassification, AudioClip};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::ClassificationResult;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

pub const AUDIO_FIELD: &str = "audio";
pub const TRANSCRIPTION_FAILED: &str = "Audio transcription failed";

/// 500 body for a failed transcription: the fallback result plus error fields
#[derive(Debug, Serialize)]
pub struct TranscriptionFailedResponse {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub error: String,
    pub details: String,
}

#[derive(Debug, Default)]
struct AudioUpload {
    clip: Option<AudioClip>,
    handle: Option<String>,
    platform: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<AudioUpload, ApiError> {
    let mut upload = AudioUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            AUDIO_FIELD => {
                let content_type = field.content_type().map(ToString::to_string);
                let file_name = field.file_name().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read audio: {e}")))?;
                debug!(size = data.len(), ?content_type, ?file_name, "Received audio part");
                upload.clip = Some(
                    AudioClip::new(data.to_vec())
                        .with_content_type(content_type)
                        .with_file_name(file_name),
                );
            },
            "handle" | "platform" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid {name} field: {e}")))?;
                if name == "handle" {
                    upload.handle = Some(value);
                } else {
                    upload.platform = Some(value);
                }
            },
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(upload)
}

/// Transcribe and classify an uploaded audio file
#[instrument(skip(state, multipart))]
pub async fn classify_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let clip = upload
        .clip
        .ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;

    let outcome = state
        .classifier
        .classify_audio(clip, upload.handle, upload.platform)
        .await?;

    Ok(match outcome {
        AudioClassification::Classified(result) => Json(result).into_response(),
        AudioClassification::TranscriptionFailed { result, failure } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TranscriptionFailedResponse {
                result,
                error: TRANSCRIPTION_FAILED.to_string(),
                details: failure.to_string(),
            }),
        )
            .into_response(),
    })
}
