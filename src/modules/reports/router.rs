use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller;

pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list).post(controller::create))
        .route("/{id}", get(controller::get))
        .route("/{id}/status", patch(controller::update_status))
}
