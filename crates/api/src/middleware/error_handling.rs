//! # Error Handling Middleware
//!
//! Maps `PortalError` to HTTP status codes and JSON error bodies. Errors that
//! end a page view also carry the page the browser should go to next.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_core::{
    errors::PortalError,
    gate::{DASHBOARD_PAGE, LOGIN_PAGE},
};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
#[derive(Debug)]
pub struct AppError(pub PortalError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::Authentication(_) => StatusCode::UNAUTHORIZED,
            PortalError::Authorization(_) => StatusCode::FORBIDDEN,
            PortalError::Deactivated(_) => StatusCode::FORBIDDEN,
            PortalError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Page the client should navigate to, if the error ends the view.
    pub fn redirect(&self) -> Option<&'static str> {
        match &self.0 {
            PortalError::Authentication(_) | PortalError::Deactivated(_) => Some(LOGIN_PAGE),
            PortalError::Authorization(_) => Some(DASHBOARD_PAGE),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let redirect = self.redirect();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string(), "redirect": redirect }));

        (status, body).into_response()
    }
}

/// Allows `?` on `PortalResult` inside handlers.
impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on repository results inside handlers; the report is wrapped
/// in `PortalError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(PortalError::Database(err))
    }
}

/// Maps a PortalError to an HTTP response
pub fn map_error(err: PortalError) -> Response {
    AppError(err).into_response()
}
