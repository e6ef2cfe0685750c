use axum::http::{header::AUTHORIZATION, StatusCode};
use chrono::Utc;
use portal_core::filter::DateCondition;
use portal_core::models::{centre::Centre, progress::ProgressRecord, schedule::ScheduleResponse};
use portal_core::render::{RenderedSchedule, NO_RESULTS_MESSAGE};
use pretty_assertions::assert_eq;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{access_record, bearer, entry, session, TestContext, DEFAULT_CENTRE};

fn centre(name: &str) -> Centre {
    Centre {
        id: Uuid::new_v4(),
        name: name.to_string(),
        location: None,
    }
}

#[tokio::test]
async fn test_student_is_locked_to_own_centre() {
    let user = session("student@example.com");
    let entries = vec![
        entry("Pune", "2026-03-01", "Anatomy"),
        entry("Pune", "2026-03-02", "Anatomy"),
        entry("Pune", "2026-03-03", "Physiology"),
    ];
    let done_id = entries[1].id;
    let user_id = user.user_id;

    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Students", Some("Pune")));
    ctx.schedule
        .expect_list_for_centre()
        .withf(|centre| centre == "Pune")
        .returning(move |_| Ok(entries.clone()));
    ctx.progress
        .expect_list_for_user()
        .withf(move |id| *id == user_id)
        .returning(move |_| {
            Ok(vec![ProgressRecord {
                user_id,
                schedule_id: done_id,
                is_done: true,
                remarks: "revise".to_string(),
                updated_at: Utc::now(),
            }])
        });
    let server = ctx.server();

    // A student cannot pick another centre.
    let response = server
        .get("/api/schedule")
        .add_query_param("centre", "Mumbai")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ScheduleResponse>();
    assert_eq!(body.centre_name, "Pune");
    assert_eq!(body.centres, None);
    assert_eq!(body.subjects, vec!["Anatomy".to_string(), "Physiology".to_string()]);
    assert_eq!(body.total, 3);

    let rows = body.schedule.rows();
    assert_eq!(rows[0].subject_rowspan, Some(2));
    assert_eq!(rows[1].subject_rowspan, None);
    assert!(rows[1].is_done);
    assert_eq!(rows[1].remarks, "revise");
    assert!(!rows[2].is_done);
}

#[tokio::test]
async fn test_student_without_centre_uses_default() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Students", None));
    ctx.schedule
        .expect_list_for_centre()
        .withf(|centre| centre == DEFAULT_CENTRE)
        .returning(|_| Ok(vec![]));
    ctx.progress.expect_list_for_user().returning(|_| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_header(AUTHORIZATION, bearer())
        .await;

    let body = response.json::<ScheduleResponse>();
    assert_eq!(body.centre_name, DEFAULT_CENTRE);
    assert_eq!(
        body.schedule,
        RenderedSchedule::Empty {
            message: format!("No sessions scheduled for {}.", DEFAULT_CENTRE)
        }
    );
}

#[tokio::test]
async fn test_admin_defaults_to_first_centre_by_name() {
    let user = session("admin@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Admin", None));
    ctx.centres
        .expect_list()
        .returning(|| Ok(vec![centre("Pune"), centre("Chennai"), centre("Mumbai")]));
    ctx.schedule
        .expect_list_for_centre()
        .withf(|centre| centre == "Chennai")
        .returning(|_| Ok(vec![entry("Chennai", "2026-03-01", "Anatomy")]));
    ctx.progress.expect_list_for_user().returning(|_| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_header(AUTHORIZATION, bearer())
        .await;

    let body = response.json::<ScheduleResponse>();
    assert_eq!(body.centre_name, "Chennai");
    assert_eq!(
        body.centres,
        Some(vec!["Chennai".to_string(), "Mumbai".to_string(), "Pune".to_string()])
    );
}

#[tokio::test]
async fn test_admin_can_pick_centre_and_filter() {
    let user = session("admin@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Super admin", None));
    ctx.centres
        .expect_list()
        .returning(|| Err(eyre::eyre!("centres table missing")));
    ctx.schedule
        .expect_list_for_centre()
        .withf(|centre| centre == "Mumbai")
        .returning(|_| {
            Ok(vec![
                entry("Mumbai", "2026-03-01", "Anatomy"),
                entry("Mumbai", "2026-03-05", "Anatomy"),
                entry("Mumbai", "2026-03-09", "Pathology"),
            ])
        });
    ctx.progress.expect_list_for_user().returning(|_| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("centre", "Mumbai")
        .add_query_param("date_condition", "after")
        .add_query_param("date_val_1", "2026-03-01")
        .add_query_param("subject", "Anatomy")
        .add_header(AUTHORIZATION, bearer())
        .await;

    let body = response.json::<ScheduleResponse>();
    assert_eq!(body.centre_name, "Mumbai");
    assert_eq!(body.centres, Some(vec![]));
    assert_eq!(body.total, 1);
    assert_eq!(body.schedule.rows()[0].date, "05 Mar 2026");
    // Subject choices come from the unfiltered schedule.
    assert_eq!(body.subjects, vec!["Anatomy".to_string(), "Pathology".to_string()]);
}

#[tokio::test]
async fn test_no_matches_shows_placeholder() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Students", Some("Pune")));
    ctx.schedule
        .expect_list_for_centre()
        .returning(|_| Ok(vec![entry("Pune", "2026-03-01", "Anatomy")]));
    ctx.progress.expect_list_for_user().returning(|_| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedule/table")
        .add_query_param("q", "cardiology")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("empty-row"));
    assert!(html.contains(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn test_blank_form_values_mean_no_filter() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.with_profile(&access_record(&user, "Students", Some("Pune")));
    ctx.schedule.expect_list_for_centre().returning(|_| {
        Ok(vec![
            entry("Pune", "2026-03-01", "Anatomy"),
            entry("Pune", "2026-03-02", "Physiology"),
        ])
    });
    ctx.progress.expect_list_for_user().returning(|_| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("date_condition", "")
        .add_query_param("date_val_1", "")
        .add_query_param("date_val_2", "")
        .add_query_param("subject", "")
        .add_query_param("q", "anatomy")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ScheduleResponse>();
    assert_eq!(body.filter.date_condition, DateCondition::All);
    assert_eq!(body.total, 1);
}

#[tokio::test]
async fn test_unknown_date_condition_is_rejected() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("date_condition", "someday")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Unknown date condition 'someday'"
    );
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let user = session("student@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("date_condition", "on")
        .add_query_param("date_val_1", "03/01/2026")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_profile_cannot_view_schedule() {
    let user = session("nobody@example.com");
    let mut ctx = TestContext::new();
    ctx.signed_in(&user);
    ctx.access.expect_find_by_email().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_header(AUTHORIZATION, bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
