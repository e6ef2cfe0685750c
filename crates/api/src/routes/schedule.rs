use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedule", get(handlers::schedule::get_schedule))
        .route("/api/schedule/table", get(handlers::schedule::get_schedule_table))
        .route(
            "/api/schedule/:id/progress/done",
            put(handlers::progress::set_completion),
        )
        .route(
            "/api/schedule/:id/progress/remarks",
            put(handlers::progress::set_remarks),
        )
        .route("/api/schedule/upload", post(handlers::upload::upload_schedule))
        .route(
            "/api/schedule/upload/sample",
            get(handlers::upload::download_sample),
        )
}
