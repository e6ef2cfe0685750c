//! Account flows: sign-up, sign-in, sign-out and the password update that
//! completes a first login.

use axum::{extract::State, http::StatusCode, Json};
use portal_core::{
    errors::PortalError,
    gate::{DASHBOARD_PAGE, DEACTIVATED_MESSAGE, LOGIN_PAGE},
    models::{
        access::{NewAccessRecord, DEFAULT_SIGNUP_ROLE},
        auth::{
            LoginRequest, LoginResponse, SignupRequest, SignupResponse, UpdatePasswordRequest,
            UpdatePasswordResponse,
        },
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    middleware::{
        auth::{self, AuthSession},
        error_handling::AppError,
    },
    ApiState,
};

fn required(value: &str, field: &str) -> Result<String, PortalError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PortalError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = required(&payload.name, "Name")?;
    let email = required(&payload.email, "Email")?;
    if payload.password.trim().is_empty() {
        return Err(PortalError::Validation("Password is required".to_string()).into());
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let user_id = state.repos.auth.create_credential(&email, &password_hash).await?;

    state
        .repos
        .access
        .create(NewAccessRecord {
            user_id: Some(user_id),
            name,
            email_id: email.clone(),
            phone_number: payload
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            role: DEFAULT_SIGNUP_ROLE.to_string(),
        })
        .await?;

    info!("Created account for {}", email);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id,
            redirect: LOGIN_PAGE.to_string(),
        }),
    ))
}

/// Signs in with email and password.
///
/// A deactivated account is refused after the credential check and the
/// session created for it is revoked straight away. A failing access lookup
/// does not block sign-in; the profile gate on the next page catches it.
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = payload.email.trim();

    let user_id = state
        .repos
        .auth
        .verify_credentials(email, &payload.password)
        .await?
        .ok_or_else(|| PortalError::Authentication("Invalid login credentials".to_string()))?;

    let token = auth::generate_session_token();
    let session = state.repos.auth.create_session(&token, user_id, email).await?;

    match state.repos.access.find_by_email(&session.email).await {
        Ok(Some(record)) if record.is_deactivated() => {
            state.repos.auth.revoke_session(&session.token).await?;
            warn!("Refused sign-in for deactivated account: {}", email);
            return Err(PortalError::Deactivated(DEACTIVATED_MESSAGE.to_string()).into());
        }
        Ok(_) => {}
        Err(e) => error!("Access check failed during sign-in for {}: {}", email, e),
    }

    Ok(Json(LoginResponse {
        token: session.token,
        redirect: DASHBOARD_PAGE.to_string(),
    }))
}

#[axum::debug_handler]
pub async fn sign_out(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
) -> Result<StatusCode, AppError> {
    state.repos.auth.revoke_session(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sets a new password and clears the first-login flag.
///
/// The flag is cleared by exact email first; when that matches nothing the
/// lookup is retried case-insensitively. The caller is signed out on
/// success and must sign in with the new password.
#[axum::debug_handler]
pub async fn update_password(
    State(state): State<Arc<ApiState>>,
    AuthSession(session): AuthSession,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<UpdatePasswordResponse>, AppError> {
    let new_password = payload.validate()?;

    let password_hash = auth::hash_password(new_password)?;
    state
        .repos
        .auth
        .update_password(session.user_id, &password_hash)
        .await?;

    let mut updated = state
        .repos
        .access
        .complete_password_reset(&session.email, false)
        .await?;
    if updated == 0 {
        warn!(
            "No access record matched {} exactly, retrying case-insensitively",
            session.email
        );
        updated = state
            .repos
            .access
            .complete_password_reset(&session.email, true)
            .await?;
    }
    if updated == 0 {
        return Err(PortalError::NotFound(format!(
            "Sync failed: User record not found for {}",
            session.email
        ))
        .into());
    }

    state.repos.auth.revoke_session(&session.token).await?;
    info!("Password updated for {}", session.email);

    Ok(Json(UpdatePasswordResponse {
        message: "Password updated successfully! Please login again.".to_string(),
        redirect: LOGIN_PAGE.to_string(),
    }))
}
