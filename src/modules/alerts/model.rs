use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct EmergencyAlert {
    pub id: Uuid,
    pub message: String,
    pub location: Option<String>,
    pub triggered_by: Uuid,
    pub triggered_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TriggerAlertDto {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}
