use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Bullying,
    Fight,
    Theft,
    Vandalism,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Report {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub description: String,
    pub location: Option<String>,
    pub anonymous: bool,
    pub status: ReportStatus,
    /// Absent when the report was filed anonymously.
    pub reporter_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[validate(length(min = 1, max = 4000))]
    pub description: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportFilterParams {
    pub status: Option<ReportStatus>,
    #[serde(rename = "type")]
    pub report_type: Option<ReportType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedReportsResponse {
    pub data: Vec<Report>,
    pub meta: PaginationMeta,
}
