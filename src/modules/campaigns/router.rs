use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller;

pub fn campaigns_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::list).post(controller::create))
        .route("/{id}", patch(controller::update).delete(controller::delete))
}
