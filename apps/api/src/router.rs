use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use availability_cell::{availability_routes, working_hours_routes, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "SmartCare HMS availability API is running!" }))
        .nest("/doctors", availability_routes(state))
        .nest("/working-hours", working_hours_routes())
}
