//! # Authentication Module
//!
//! Password hashing for stored credentials, session token generation, and
//! the [`AuthSession`] extractor that turns a bearer token into the
//! caller's session.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use eyre::Result;
use portal_core::{errors::PortalError, models::auth::Session};
use rand::{distributions::Alphanumeric, Rng};

use crate::{middleware::error_handling::AppError, ApiState};

const SESSION_TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// Returns the hash in PHC string format (algorithm, parameters, salt and
/// hash in one string).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The caller's active session. Rejects with `401` and a redirect to the
/// login page when the token is missing or no longer valid.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| PortalError::Authentication("Not signed in".to_string()))?;

        match state.repos.auth.get_session(token).await? {
            Some(session) => Ok(AuthSession(session)),
            None => Err(AppError(PortalError::Authentication(
                "Session expired or signed out".to_string(),
            ))),
        }
    }
}
