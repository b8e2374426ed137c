use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::middleware::auth::CurrentSession;
use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::validator::ValidatedJson;

use super::model::{
    CreateReportDto, PaginatedReportsResponse, Report, ReportFilterParams, UpdateReportStatusDto,
};
use super::service::ReportsService;

/// File an incident report
///
/// Any signed-in user may report. When `anonymous` is set the report is
/// stored without a reporter id.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report filed", body = Report),
        (status = 401, description = "Not signed in"),
    )
)]
pub async fn create(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateReportDto>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    let report = ReportsService::create(&state.db, &session, dto).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// List reports
///
/// Staff and administrators see every report; students see only the reports
/// they filed under their own name.
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated list of reports", body = PaginatedReportsResponse),
    )
)]
pub async fn list(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    Query(filters): Query<ReportFilterParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedReportsResponse>, AppError> {
    let response = ReportsService::list(&state.db, &session, filters, pagination).await?;
    Ok(Json(response))
}

/// Get a report by id
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report", body = Report),
        (status = 404, description = "Report not found or out of scope"),
    )
)]
pub async fn get(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Report>, AppError> {
    let report = ReportsService::get(&state.db, &session, id).await?;
    Ok(Json(report))
}

/// Update a report's status
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Updated report", body = Report),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Report not found"),
    )
)]
pub async fn update_status(
    RequireStaff(_session): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateReportStatusDto>,
) -> Result<Json<Report>, AppError> {
    let report = ReportsService::update_status(&state.db, id, dto).await?;
    Ok(Json(report))
}
