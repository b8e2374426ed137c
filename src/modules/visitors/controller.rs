use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{RegisterVisitorDto, Visitor, VisitorFilterParams};
use super::service::VisitorsService;

/// Register a visitor at the gate
#[utoipa::path(
    post,
    path = "/api/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    request_body = RegisterVisitorDto,
    responses(
        (status = 201, description = "Visitor registered", body = Visitor),
        (status = 403, description = "Caller is not staff"),
    )
)]
pub async fn register(
    RequireStaff(session): RequireStaff,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterVisitorDto>,
) -> Result<(StatusCode, Json<Visitor>), AppError> {
    let visitor = VisitorsService::register(&state.db, session.principal_id, dto).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// List visitors
#[utoipa::path(
    get,
    path = "/api/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(VisitorFilterParams),
    responses(
        (status = 200, description = "Visitors, most recent entry first", body = [Visitor]),
        (status = 403, description = "Caller is not staff"),
    )
)]
pub async fn list(
    RequireStaff(_session): RequireStaff,
    State(state): State<AppState>,
    Query(filters): Query<VisitorFilterParams>,
) -> Result<Json<Vec<Visitor>>, AppError> {
    let visitors = VisitorsService::list(&state.db, filters).await?;
    Ok(Json(visitors))
}

/// Check a visitor out
#[utoipa::path(
    patch,
    path = "/api/visitors/{id}/checkout",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Visitor id")),
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Visitor already checked out"),
    )
)]
pub async fn checkout(
    RequireStaff(_session): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Visitor>, AppError> {
    let visitor = VisitorsService::checkout(&state.db, id).await?;
    Ok(Json(visitor))
}
