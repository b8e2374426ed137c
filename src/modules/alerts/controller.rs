use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::auth::CurrentSession;
use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{EmergencyAlert, TriggerAlertDto};
use super::service::AlertsService;

/// Trigger an emergency alert
#[utoipa::path(
    post,
    path = "/api/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    request_body = TriggerAlertDto,
    responses(
        (status = 201, description = "Alert triggered", body = EmergencyAlert),
        (status = 403, description = "Caller is not staff"),
    )
)]
pub async fn trigger(
    RequireStaff(session): RequireStaff,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TriggerAlertDto>,
) -> Result<(StatusCode, Json<EmergencyAlert>), AppError> {
    let alert = AlertsService::trigger(&state.db, session.principal_id, dto).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// List alerts
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Alerts, active first", body = [EmergencyAlert]),
        (status = 401, description = "Not signed in"),
    )
)]
pub async fn list(
    CurrentSession(_session): CurrentSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<EmergencyAlert>>, AppError> {
    let alerts = AlertsService::list(&state.db).await?;
    Ok(Json(alerts))
}

/// Resolve an alert
#[utoipa::path(
    patch,
    path = "/api/alerts/{id}/resolve",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Alert id")),
    responses(
        (status = 200, description = "Alert resolved", body = EmergencyAlert),
        (status = 404, description = "Alert not found"),
        (status = 409, description = "Alert already resolved"),
    )
)]
pub async fn resolve(
    RequireStaff(session): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmergencyAlert>, AppError> {
    let alert = AlertsService::resolve(&state.db, id, session.principal_id).await?;
    Ok(Json(alert))
}
