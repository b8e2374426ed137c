use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignCategory {
    DigitalSafety,
    TrafficEducation,
    General,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: CampaignCategory,
    /// Inactive campaigns stay in the database but are hidden from readers.
    pub is_active: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCampaignDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 8000))]
    pub description: String,
    pub category: CampaignCategory,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCampaignDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 8000))]
    pub description: Option<String>,
    pub category: Option<CampaignCategory>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignFilterParams {
    pub category: Option<CampaignCategory>,
}
