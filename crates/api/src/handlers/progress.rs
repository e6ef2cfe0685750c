//! Per-user progress writes from the schedule table.
//!
//! A write only needs a valid session. Storage failures are logged and
//! reported as `saved: false` so the page keeps the user's input and can
//! show it as unsaved.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use portal_core::models::progress::{
    ProgressKey, ProgressPatch, ProgressWriteResponse, SetCompletionRequest, SetRemarksRequest,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthSession, error_handling::AppError},
    ApiState,
};

async fn write_progress(
    state: &ApiState,
    key: ProgressKey,
    patch: ProgressPatch,
) -> (StatusCode, Json<ProgressWriteResponse>) {
    let field = patch.field_name();
    let saved = match state.repos.progress.upsert(key, patch).await {
        Ok(_) => true,
        Err(e) => {
            error!(
                "Failed to save {} for schedule {}: {}",
                field,
                key.schedule_id(),
                e
            );
            false
        }
    };

    (
        StatusCode::ACCEPTED,
        Json(ProgressWriteResponse {
            schedule_id: key.schedule_id(),
            saved,
        }),
    )
}

#[axum::debug_handler]
pub async fn set_completion(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<SetCompletionRequest>,
) -> Result<(StatusCode, Json<ProgressWriteResponse>), AppError> {
    let key = ProgressKey::new(session.user_id, schedule_id)?;
    Ok(write_progress(&state, key, ProgressPatch::Completion(payload.is_done)).await)
}

#[axum::debug_handler]
pub async fn set_remarks(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<SetRemarksRequest>,
) -> Result<(StatusCode, Json<ProgressWriteResponse>), AppError> {
    let key = ProgressKey::new(session.user_id, schedule_id)?;
    Ok(write_progress(&state, key, ProgressPatch::Remarks(payload.remarks)).await)
}
