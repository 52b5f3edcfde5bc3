use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Mounted under `/doctors`.
pub fn availability_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{doctor_id}/available-dates", get(handlers::get_available_dates))
        .route("/{doctor_id}/available-times", get(handlers::get_available_times))
        .route("/{doctor_id}/working-hours", get(handlers::get_working_hours))
        .with_state(state)
}

/// Mounted under `/working-hours`.
pub fn working_hours_routes() -> Router {
    Router::new()
        .route("/preview", post(handlers::preview_working_hours))
        .route("/slots", get(handlers::get_time_slots))
}
