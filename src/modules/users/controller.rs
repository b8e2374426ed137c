use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;

use super::model::{PaginatedUsersResponse, UpdateRoleDto, UpdateStatusDto, User, UserFilterParams};
use super::service::UsersService;

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated list of users", body = PaginatedUsersResponse),
        (status = 403, description = "Caller is not an administrator"),
    )
)]
pub async fn list(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Query(filters): Query<UserFilterParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let response = UsersService::list(&state.db, filters, pagination).await?;
    Ok(Json(response))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UsersService::get(&state.db, id).await?;
    Ok(Json(user))
}

/// Change a user's role
#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Cannot change your own role"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_role(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateRoleDto>,
) -> Result<Json<User>, AppError> {
    let user = UsersService::update_role(&state.db, session.principal_id, id, dto).await?;
    Ok(Json(user))
}

/// Activate or deactivate a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Cannot change your own account status"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_status(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateStatusDto>,
) -> Result<Json<User>, AppError> {
    let user = UsersService::update_status(&state.db, session.principal_id, id, dto).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Cannot delete your own account"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UsersService::delete(&state.db, session.principal_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
