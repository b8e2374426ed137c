use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::auth::CurrentSession;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use super::service::NoticesService;

/// Publish a notice
#[utoipa::path(
    post,
    path = "/api/notices",
    tag = "notices",
    security(("bearer_auth" = [])),
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice published", body = Notice),
        (status = 403, description = "Caller is not staff"),
    )
)]
pub async fn create(
    RequireStaff(session): RequireStaff,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    let notice = NoticesService::create(&state.db, session.principal_id, dto).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

/// Notice board
#[utoipa::path(
    get,
    path = "/api/notices",
    tag = "notices",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active notices, newest first", body = [Notice]),
        (status = 401, description = "Not signed in"),
    )
)]
pub async fn list(
    CurrentSession(_session): CurrentSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let notices = NoticesService::list_active(&state.db).await?;
    Ok(Json(notices))
}

/// Edit a notice
#[utoipa::path(
    patch,
    path = "/api/notices/{id}",
    tag = "notices",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notice id")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Updated notice", body = Notice),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Notice not found"),
    )
)]
pub async fn update(
    RequireStaff(_session): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<Json<Notice>, AppError> {
    let notice = NoticesService::update(&state.db, id, dto).await?;
    Ok(Json(notice))
}

/// Delete a notice
#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    tag = "notices",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notice id")),
    responses(
        (status = 204, description = "Notice deleted"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Notice not found"),
    )
)]
pub async fn delete(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    NoticesService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
