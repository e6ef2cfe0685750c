use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/auth/signup", post(handlers::auth::sign_up))
        .route("/api/auth/login", post(handlers::auth::sign_in))
        .route("/api/auth/logout", post(handlers::auth::sign_out))
        .route("/api/auth/password", post(handlers::auth::update_password))
}
