use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list))
        .route("/{id}", get(controller::get).delete(controller::delete))
        .route("/{id}/role", patch(controller::update_role))
        .route("/{id}/status", patch(controller::update_status))
}
