use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::alerts::router::alerts_routes;
use crate::modules::auth::router::auth_routes;
use crate::modules::campaigns::router::campaigns_routes;
use crate::modules::notices::router::notices_routes;
use crate::modules::reports::router::reports_routes;
use crate::modules::users::router::users_routes;
use crate::modules::visitors::router::visitors_routes;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth_routes())
                .nest("/users", users_routes())
                .nest("/reports", reports_routes())
                .nest("/notices", notices_routes())
                .nest("/visitors", visitors_routes())
                .nest("/campaigns", campaigns_routes())
                .nest("/alerts", alerts_routes()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
