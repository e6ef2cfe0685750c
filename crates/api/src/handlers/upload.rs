use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use portal_core::upload::{self, UploadRequest, UploadResponse, SAMPLE_CSV, SAMPLE_FILE_NAME};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    handlers::page,
    middleware::{auth::AuthSession, error_handling::AppError},
    ApiState,
};

/// Bulk-loads schedule rows for one centre from CSV text.
///
/// Malformed lines are skipped and listed in the response; the valid rows
/// are inserted together or not at all.
#[axum::debug_handler]
pub async fn upload_schedule(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Json(payload): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let ctx = page::require_admin(&state, session).await?;

    let batch = upload::parse_schedule_csv(&payload.csv, &payload.centre_name)?;
    for line in &batch.skipped {
        warn!("Skipping CSV row {}: {}", line.row, line.reason);
    }

    let message = batch.success_message();
    let inserted = state.repos.schedule.insert_batch(batch.rows).await?;
    info!(
        "{} uploaded {} rows for {}",
        ctx.session.email, inserted, batch.centre_name
    );

    Ok(Json(UploadResponse {
        inserted: inserted as usize,
        centre_name: batch.centre_name,
        skipped: batch.skipped,
        message,
    }))
}

/// Sample file showing the expected column layout.
pub async fn download_sample() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SAMPLE_FILE_NAME),
            ),
        ],
        SAMPLE_CSV,
    )
}
