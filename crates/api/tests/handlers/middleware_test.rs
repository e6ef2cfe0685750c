use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use portal_api::middleware::error_handling::{map_error, AppError};
use portal_core::errors::PortalError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::{bearer, TestContext, TOKEN};

#[rstest]
#[case(PortalError::NotFound("missing".to_string()), StatusCode::NOT_FOUND, None)]
#[case(PortalError::Validation("bad".to_string()), StatusCode::BAD_REQUEST, None)]
#[case(PortalError::Authentication("who".to_string()), StatusCode::UNAUTHORIZED, Some("index.html"))]
#[case(PortalError::Authorization("no".to_string()), StatusCode::FORBIDDEN, Some("dashboard.html"))]
#[case(PortalError::Deactivated("gone".to_string()), StatusCode::FORBIDDEN, Some("index.html"))]
#[case(PortalError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR, None)]
fn test_error_mapping(
    #[case] error: PortalError,
    #[case] status: StatusCode,
    #[case] redirect: Option<&str>,
) {
    let error = AppError(error);
    assert_eq!(error.status(), status);
    assert_eq!(error.redirect(), redirect);
}

#[tokio::test]
async fn test_map_error_sets_status() {
    let response = map_error(PortalError::Validation("Invalid input".to_string()));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let server = TestContext::new().server();

    let response = server.get("/api/profile").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["redirect"], "index.html");
}

#[tokio::test]
async fn test_revoked_token_is_unauthenticated() {
    let mut ctx = TestContext::new();
    ctx.auth
        .expect_get_session()
        .withf(|token| token == TOKEN)
        .returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_header_is_ignored() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = server.get("/version").await;
    assert_eq!(version.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}
