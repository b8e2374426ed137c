use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: Uuid,
    pub name: String,
    /// Identity document presented at the gate.
    pub document: String,
    pub purpose: Option<String>,
    pub entry_time: DateTime<Utc>,
    /// Still on the premises while this is null.
    pub exit_time: Option<DateTime<Utc>>,
    pub registered_by: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterVisitorDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub document: String,
    #[validate(length(max = 500))]
    pub purpose: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisitorFilterParams {
    /// When true, only visitors who have not checked out yet.
    pub open: Option<bool>,
}
