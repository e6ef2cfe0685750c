//! Centre management for admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use portal_core::{
    errors::PortalError,
    models::centre::{fallback_centres, Centre, CentreListResponse, CentreRequest},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    handlers::page,
    middleware::{auth::AuthSession, error_handling::AppError},
    ApiState,
};

/// Lists centres by name. When the centres collection cannot be read, the
/// distinct centre names found on access records are listed instead and
/// `fallback` is set.
#[axum::debug_handler]
pub async fn list_centres(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
) -> Result<Json<CentreListResponse>, AppError> {
    page::require_admin(&state, session).await?;

    match state.repos.centres.list().await {
        Ok(centres) => Ok(Json(CentreListResponse {
            centres: centres.into_iter().map(Into::into).collect(),
            fallback: false,
        })),
        Err(e) => {
            warn!("Centres table unavailable, listing centres from access records: {}", e);
            let names = state.repos.access.centre_names().await?;
            Ok(Json(CentreListResponse {
                centres: fallback_centres(names.iter().map(Option::as_deref)),
                fallback: true,
            }))
        }
    }
}

#[axum::debug_handler]
pub async fn create_centre(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Json(payload): Json<CentreRequest>,
) -> Result<(StatusCode, Json<Centre>), AppError> {
    page::require_admin(&state, session).await?;
    let (name, location) = payload.normalized()?;

    let centre = state
        .repos
        .centres
        .create(&name, location)
        .await?
        .ok_or_else(|| PortalError::Validation("Centre already exists".to_string()))?;
    info!("Created centre {}", centre.name);

    Ok((StatusCode::CREATED, Json(centre)))
}

#[axum::debug_handler]
pub async fn update_centre(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<CentreRequest>,
) -> Result<Json<Centre>, AppError> {
    page::require_admin(&state, session).await?;
    let (name, location) = payload.normalized()?;

    let centre = state
        .repos
        .centres
        .update(id, &name, location)
        .await?
        .ok_or_else(|| PortalError::NotFound(format!("Centre {} not found", id)))?;

    Ok(Json(centre))
}

#[axum::debug_handler]
pub async fn delete_centre(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    page::require_admin(&state, session).await?;

    if !state.repos.centres.delete(id).await? {
        return Err(PortalError::NotFound(format!("Centre {} not found", id)).into());
    }

    info!("Deleted centre {}", id);
    Ok(StatusCode::NO_CONTENT)
}
