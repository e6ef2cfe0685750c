use axum::http::{header::AUTHORIZATION, StatusCode};
use portal_core::models::centre::{Centre, CentreListResponse, FALLBACK_LOCATION};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{access_record, bearer, session, TestContext};

fn admin_context() -> TestContext {
    let user = session("admin@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Admin", None));
    ctx
}

#[tokio::test]
async fn test_list_centres() {
    let mut ctx = admin_context();
    ctx.centres.expect_list().returning(|| {
        Ok(vec![Centre {
            id: Uuid::new_v4(),
            name: "Delhi".to_string(),
            location: Some("Karol Bagh".to_string()),
        }])
    });
    let server = ctx.server();

    let response = server
        .get("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<CentreListResponse>();
    assert!(!body.fallback);
    assert_eq!(body.centres.len(), 1);
    assert!(body.centres[0].id.is_some());
}

#[tokio::test]
async fn test_list_falls_back_to_access_records() {
    let mut ctx = admin_context();
    ctx.centres
        .expect_list()
        .returning(|| Err(eyre::eyre!("relation \"centres\" does not exist")));
    ctx.access.expect_centre_names().returning(|| {
        Ok(vec![
            Some("Delhi".to_string()),
            None,
            Some(" Delhi ".to_string()),
            Some(String::new()),
            Some("Pune".to_string()),
        ])
    });
    let server = ctx.server();

    let response = server
        .get("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .await;

    let body = response.json::<CentreListResponse>();
    assert!(body.fallback);
    let names: Vec<&str> = body.centres.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Delhi", "Pune"]);
    assert!(body.centres.iter().all(|c| c.id.is_none()));
    assert_eq!(body.centres[0].location.as_deref(), Some(FALLBACK_LOCATION));
}

#[tokio::test]
async fn test_create_centre_trims_input() {
    let mut ctx = admin_context();
    ctx.centres
        .expect_create()
        .withf(|name, location| name == "Pune" && location.is_none())
        .times(1)
        .returning(|name, location| {
            Ok(Some(Centre {
                id: Uuid::new_v4(),
                name: name.to_string(),
                location,
            }))
        });
    let server = ctx.server();

    let response = server
        .post("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "name": "  Pune ", "location": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Centre>().name, "Pune");
}

#[tokio::test]
async fn test_duplicate_centre_name_is_rejected() {
    let mut ctx = admin_context();
    ctx.centres
        .expect_create()
        .times(1)
        .returning(|_, _| Ok(None));
    let server = ctx.server();

    let response = server
        .post("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "name": "Delhi", "location": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Centre already exists"
    );
}

#[tokio::test]
async fn test_create_centre_requires_name() {
    let server = admin_context().server();

    let response = server
        .post("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "name": " ", "location": "Somewhere" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_centre() {
    let mut ctx = admin_context();
    ctx.centres.expect_update().returning(|_, _, _| Ok(None));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/centres/{}", Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "name": "Pune", "location": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_centre() {
    let id = Uuid::new_v4();
    let mut ctx = admin_context();
    ctx.centres
        .expect_delete()
        .withf(move |centre_id| *centre_id == id)
        .times(1)
        .returning(|_| Ok(true));
    let server = ctx.server();

    let response = server
        .delete(&format!("/api/centres/{}", id))
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_first_login_admin_is_redirected() {
    let user = session("admin@example.com");
    let mut record = access_record(&user, "Admin", None);
    record.is_first_login = true;

    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&record);
    let server = ctx.server();

    let response = server
        .get("/api/centres")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
