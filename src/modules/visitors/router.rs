use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller;

pub fn visitors_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list).post(controller::register))
        .route("/{id}/checkout", patch(controller::checkout))
}
