use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use portal_core::{
    models::schedule::{ScheduleQuery, ScheduleResponse},
    render,
    view::ScheduleView,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    handlers::page::{self, PageContext},
    middleware::{auth::AuthSession, error_handling::AppError},
    ApiState,
};

/// Centre choices for admins, sorted by name. A failed fetch leaves the
/// picker empty instead of failing the page.
async fn admin_centres(state: &ApiState) -> Vec<String> {
    match state.repos.centres.list().await {
        Ok(centres) => {
            let mut names: Vec<String> = centres.into_iter().map(|c| c.name).collect();
            names.sort();
            names
        }
        Err(e) => {
            warn!("Failed to load centres for the schedule picker: {}", e);
            Vec::new()
        }
    }
}

/// Picks the centre to show. Admins may choose; everyone else is locked to
/// the centre on their access record.
async fn resolve_centre(
    state: &ApiState,
    ctx: &PageContext,
    query: &ScheduleQuery,
) -> (String, Option<Vec<String>>) {
    if ctx.record.is_admin() {
        let centres = admin_centres(state).await;
        let centre = query
            .requested_centre()
            .map(str::to_string)
            .or_else(|| centres.first().cloned())
            .unwrap_or_else(|| state.default_centre.clone());
        (centre, Some(centres))
    } else {
        let centre = ctx
            .record
            .centre_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| state.default_centre.clone());
        (centre, None)
    }
}

async fn load_view(
    state: &ApiState,
    session: AuthSession,
    query: &ScheduleQuery,
) -> Result<(ScheduleView, Option<Vec<String>>), AppError> {
    let filter = query.filter_state()?;
    let ctx = page::require_active(state, session.0).await?;
    let (centre, centres) = resolve_centre(state, &ctx, query).await;

    let (entries, progress) = tokio::try_join!(
        state.repos.schedule.list_for_centre(&centre),
        state.repos.progress.list_for_user(ctx.session.user_id),
    )?;
    debug!(
        "Loaded {} sessions and {} progress records for {}",
        entries.len(),
        progress.len(),
        centre
    );

    let mut view = ScheduleView::new(centre, entries, progress);
    view.set_filter(filter);
    Ok((view, centres))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    session: AuthSession,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let (view, centres) = load_view(&state, session, &query).await?;

    let schedule = view.render();
    Ok(Json(ScheduleResponse {
        centre_name: view.centre_name().to_string(),
        centres,
        subjects: view.subjects(),
        filter: view.filter().clone(),
        total: schedule.rows().len(),
        schedule,
    }))
}

/// Table body markup for the same query as [`get_schedule`].
#[axum::debug_handler]
pub async fn get_schedule_table(
    State(state): State<Arc<ApiState>>,
    session: AuthSession,
    Query(query): Query<ScheduleQuery>,
) -> Result<Html<String>, AppError> {
    let (view, _) = load_view(&state, session, &query).await?;
    Ok(Html(render::render_html(&view.render())))
}
