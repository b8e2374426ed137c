use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::auth::CurrentSession;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Campaign, CampaignFilterParams, CreateCampaignDto, UpdateCampaignDto};
use super::service::CampaignsService;

/// Publish an awareness campaign
#[utoipa::path(
    post,
    path = "/api/campaigns",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    request_body = CreateCampaignDto,
    responses(
        (status = 201, description = "Campaign published", body = Campaign),
        (status = 403, description = "Caller is not staff"),
    )
)]
pub async fn create(
    RequireStaff(session): RequireStaff,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCampaignDto>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    let campaign = CampaignsService::create(&state.db, session.principal_id, dto).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// List active campaigns
#[utoipa::path(
    get,
    path = "/api/campaigns",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(CampaignFilterParams),
    responses(
        (status = 200, description = "Active campaigns, newest first", body = [Campaign]),
        (status = 401, description = "Not signed in"),
    )
)]
pub async fn list(
    CurrentSession(_session): CurrentSession,
    State(state): State<AppState>,
    Query(filters): Query<CampaignFilterParams>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let campaigns = CampaignsService::list_active(&state.db, filters).await?;
    Ok(Json(campaigns))
}

/// Edit a campaign
#[utoipa::path(
    patch,
    path = "/api/campaigns/{id}",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Campaign id")),
    request_body = UpdateCampaignDto,
    responses(
        (status = 200, description = "Updated campaign", body = Campaign),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Campaign not found"),
    )
)]
pub async fn update(
    RequireStaff(_session): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCampaignDto>,
) -> Result<Json<Campaign>, AppError> {
    let campaign = CampaignsService::update(&state.db, id, dto).await?;
    Ok(Json(campaign))
}

/// Delete a campaign
#[utoipa::path(
    delete,
    path = "/api/campaigns/{id}",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Campaign not found"),
    )
)]
pub async fn delete(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CampaignsService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
