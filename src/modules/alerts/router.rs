use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller;

pub fn alerts_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list).post(controller::trigger))
        .route("/{id}/resolve", patch(controller::resolve))
}
