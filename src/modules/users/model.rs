use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use vigia_core::Role;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored as text; parsed into [`Role`] only at the access-control
    /// boundary.
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    /// Filter by role (student, staff or admin).
    #[param(value_type = Option<String>, example = "staff")]
    pub role: Option<Role>,
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    #[schema(value_type = String, example = "staff")]
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}
