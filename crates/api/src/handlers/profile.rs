use axum::{extract::State, Json};
use portal_core::{
    errors::PortalError,
    gate::{DEACTIVATED_MESSAGE, GateState},
};
use std::sync::Arc;

use crate::{
    handlers::page,
    middleware::{auth::AuthSession, error_handling::AppError},
    ApiState,
};

/// Profile for the page header.
///
/// Answers with the `active` or `profile_missing` state; a deactivated
/// account is signed out and gets `403` with a redirect to the login page.
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
) -> Result<Json<GateState>, AppError> {
    let gate = page::load_gate(&state, &session).await;

    if gate.redirect().is_some() {
        return Err(AppError(PortalError::Deactivated(DEACTIVATED_MESSAGE.to_string())));
    }

    Ok(Json(gate))
}
