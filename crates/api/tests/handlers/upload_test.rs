use axum::http::{header::AUTHORIZATION, header::CONTENT_DISPOSITION, StatusCode};
use portal_core::upload::{UploadResponse, NO_VALID_ROWS_MESSAGE, SAMPLE_CSV};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{access_record, bearer, session, TestContext};

const CSV: &str = "Date, Topic, Custom Module Code, Start Date & Time, End Date & Time, Number of Questions
2026-03-01, Anatomy: Lower Limb, ANA-LL-01, 2026-03-01 10:00:00, 2026-03-01 12:00:00, 50
2026-03-02, Anatomy: Upper Limb, ANA-UL-01, 2026-03-02 10:00:00
2026-03-03, Physiology: Renal, PHY-RN-01, 2026-03-03 09:00:00, 2026-03-03 11:00:00, 40+
";

#[tokio::test]
async fn test_upload_skips_short_rows() {
    let user = session("admin@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Academics", None));
    ctx.schedule
        .expect_insert_batch()
        .withf(|rows| {
            rows.len() == 2
                && rows.iter().all(|r| r.centre_name == "Pune")
                && rows[0].subject == "Anatomy"
                && rows[1].subject == "Physiology"
                && rows[1].num_questions == 40
        })
        .times(1)
        .returning(|rows| Ok(rows.len() as u64));
    let server = ctx.server();

    let response = server
        .post("/api/schedule/upload")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "centre_name": "Pune", "csv": CSV }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<UploadResponse>();
    assert_eq!(body.inserted, 2);
    assert_eq!(body.skipped.len(), 1);
    assert_eq!(body.skipped[0].row, 2);
    assert_eq!(body.message, "Successfully synced 2 rows for Pune centre!");
}

#[tokio::test]
async fn test_upload_without_valid_rows_is_rejected() {
    let user = session("admin@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Admin", None));
    let server = ctx.server();

    let response = server
        .post("/api/schedule/upload")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "centre_name": "Pune", "csv": "Date, Topic\nnot, enough\n" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("Validation error: {}", NO_VALID_ROWS_MESSAGE)
    );
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Students", Some("Pune")));
    let server = ctx.server();

    let response = server
        .post("/api/schedule/upload")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "centre_name": "Pune", "csv": CSV }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["redirect"], "dashboard.html");
}

#[tokio::test]
async fn test_sample_download() {
    let server = TestContext::new().server();

    let response = server.get("/api/schedule/upload/sample").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header(CONTENT_DISPOSITION),
        "attachment; filename=\"mentorship_schedule_sample.csv\""
    );
    assert_eq!(response.text(), SAMPLE_CSV);
}
