use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use dictation_application::{
    CreateTrackRequest, CreateTrackResponse, DeleteTrackResponse, GradeDictationRequest,
    GradeDictationResponse,
};

use crate::error::{error_mapper, HttpError};
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn create_track(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTrackRequest>,
) -> Result<(StatusCode, Json<CreateTrackResponse>), HttpError> {
    tracing::info!(
        topic_id = %request.topic_id,
        name = %request.name,
        segment_count = request.segments.len(),
        audio_bytes = request.audio.len(),
        "received create track request"
    );

    match state.create_track.create_track(request).await {
        Ok(response) => {
            tracing::info!(
                track_id = %response.track_id,
                segment_count = response.segments.len(),
                "create track request completed"
            );
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "create track request failed");
            Err(error_mapper(error))
        }
    }
}

pub async fn check_dictation(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GradeDictationRequest>,
) -> Result<(StatusCode, Json<GradeDictationResponse>), HttpError> {
    tracing::info!(
        segment_id = %request.segment_id,
        learner_id = %request.learner_id,
        content_chars = request.content.len(),
        "received dictation check request"
    );

    match state.grade_dictation.grade(request).await {
        Ok(response) => {
            tracing::info!(
                segment_id = %response.segment_id,
                score = response.score,
                "dictation check request completed"
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "dictation check request failed");
            Err(error_mapper(error))
        }
    }
}

pub async fn delete_track(
    State(state): State<AppState>,
    Path(track_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeleteTrackResponse>), HttpError> {
    tracing::info!(track_id = %track_id, "received delete track request");

    match state.delete_track.delete_track(track_id).await {
        Ok(response) => {
            tracing::info!(track_id = %track_id, "delete track request completed");
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "delete track request failed");
            Err(error_mapper(error))
        }
    }
}
