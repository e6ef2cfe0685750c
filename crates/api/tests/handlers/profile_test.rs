use axum::http::{header::AUTHORIZATION, StatusCode};
use portal_core::gate::{GateState, DEACTIVATED_MESSAGE};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::{access_record, bearer, session, TestContext, TOKEN};

#[tokio::test]
async fn test_active_profile() {
    let user = session("asha@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Mentor", Some("Pune")));
    let server = ctx.server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    match response.json::<GateState>() {
        GateState::Active { header, record } => {
            assert_eq!(header.display_name, "Test User");
            assert_eq!(header.avatar_initial, "T");
            assert!(header.is_admin);
            assert_eq!(record.centre_name.as_deref(), Some("Pune"));
        }
        other => panic!("expected active profile, got {:?}", other),
    }
}

#[tokio::test]
async fn test_deactivated_profile_is_signed_out() {
    let user = session("asha@example.com");
    let mut record = access_record(&user, "Students", Some("Pune"));
    record.is_active = Some(false);

    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&record);
    ctx.auth
        .expect_revoke_session()
        .withf(|token| token == TOKEN)
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body = response.json::<Value>();
    assert_eq!(body["redirect"], "index.html");
    assert_eq!(body["error"], format!("Account deactivated: {}", DEACTIVATED_MESSAGE));
}

#[tokio::test]
async fn test_missing_profile_is_read_only() {
    let user = session("rahul.k@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.access.expect_find_by_email().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    match response.json::<GateState>() {
        GateState::ProfileMissing { header } => {
            assert_eq!(header.display_name, "rahul.k");
            assert!(header.read_only);
        }
        other => panic!("expected missing profile, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_lookup_degrades_to_missing_profile() {
    let user = session("rahul@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.access
        .expect_find_by_email()
        .returning(|_| Err(eyre::eyre!("connection reset")));
    let server = ctx.server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(matches!(response.json::<GateState>(), GateState::ProfileMissing { .. }));
}

#[tokio::test]
async fn test_unlinked_record_is_linked_to_user() {
    let user = session("asha@example.com");
    let mut record = access_record(&user, "Students", Some("Pune"));
    record.user_id = None;
    let access_id = record.id;
    let user_id = user.user_id;

    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&record);
    ctx.access
        .expect_link_user()
        .withf(move |id, uid| *id == access_id && *uid == user_id)
        .times(1)
        .returning(|_, _| Ok(()));
    let server = ctx.server();

    let response = server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer())
        .await;

    match response.json::<GateState>() {
        GateState::Active { record, .. } => assert_eq!(record.user_id, Some(user_id)),
        other => panic!("expected active profile, got {:?}", other),
    }
}
