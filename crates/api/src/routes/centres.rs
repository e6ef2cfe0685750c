use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/centres",
            get(handlers::centres::list_centres).post(handlers::centres::create_centre),
        )
        .route(
            "/api/centres/:id",
            put(handlers::centres::update_centre).delete(handlers::centres::delete_centre),
        )
}
