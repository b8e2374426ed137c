use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    Campaign, CampaignFilterParams, CreateCampaignDto, UpdateCampaignDto,
};

const CAMPAIGN_COLUMNS: &str =
    "id, title, description, category, is_active, author_id, created_at";

pub struct CampaignsService;

impl CampaignsService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateCampaignDto,
    ) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"INSERT INTO campaigns (title, description, category, author_id)
               VALUES ($1, $2, $3, $4)
               RETURNING {CAMPAIGN_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category)
        .bind(author_id)
        .fetch_one(db)
        .await?;

        Ok(campaign)
    }

    /// Reader view: active campaigns only, newest first.
    #[instrument(skip(db))]
    pub async fn list_active(
        db: &PgPool,
        filters: CampaignFilterParams,
    ) -> Result<Vec<Campaign>, AppError> {
        let campaigns = match filters.category {
            Some(category) => {
                sqlx::query_as::<_, Campaign>(&format!(
                    "SELECT {CAMPAIGN_COLUMNS} FROM campaigns \
                     WHERE is_active AND category = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(category)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Campaign>(&format!(
                    "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE is_active \
                     ORDER BY created_at DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(campaigns)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        campaign_id: Uuid,
        dto: UpdateCampaignDto,
    ) -> Result<Campaign, AppError> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"UPDATE campaigns
               SET title = COALESCE($1, title),
                   description = COALESCE($2, description),
                   category = COALESCE($3, category),
                   is_active = COALESCE($4, is_active)
               WHERE id = $5
               RETURNING {CAMPAIGN_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category)
        .bind(dto.is_active)
        .bind(campaign_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Campaign not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, campaign_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(campaign_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Campaign not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::CampaignCategory;
    use super::*;
    use axum::http::StatusCode;
    use vigia_core::Role;

    async fn staff_id(pool: &PgPool) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind("Carla Dias")
        .bind("carla@escola.edu")
        .bind(Role::Staff.as_str())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn campaign_dto(title: &str, category: CampaignCategory) -> CreateCampaignDto {
        CreateCampaignDto {
            title: title.to_string(),
            description: "Material de conscientização.".to_string(),
            category,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn category_filter(pool: PgPool) {
        let author = staff_id(&pool).await;

        CampaignsService::create(
            &pool,
            author,
            campaign_dto("Senhas seguras", CampaignCategory::DigitalSafety),
        )
        .await
        .unwrap();
        CampaignsService::create(
            &pool,
            author,
            campaign_dto("Travessia segura", CampaignCategory::TrafficEducation),
        )
        .await
        .unwrap();

        let digital = CampaignsService::list_active(
            &pool,
            CampaignFilterParams {
                category: Some(CampaignCategory::DigitalSafety),
            },
        )
        .await
        .unwrap();
        assert_eq!(digital.len(), 1);
        assert_eq!(digital[0].title, "Senhas seguras");

        let all = CampaignsService::list_active(&pool, CampaignFilterParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn deactivated_campaign_is_hidden_from_readers(pool: PgPool) {
        let author = staff_id(&pool).await;

        let campaign = CampaignsService::create(
            &pool,
            author,
            campaign_dto("Senhas seguras", CampaignCategory::DigitalSafety),
        )
        .await
        .unwrap();
        assert!(campaign.is_active);

        CampaignsService::update(
            &pool,
            campaign.id,
            UpdateCampaignDto {
                title: None,
                description: None,
                category: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

        let visible = CampaignsService::list_active(&pool, CampaignFilterParams::default())
            .await
            .unwrap();
        assert!(visible.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_can_recategorize(pool: PgPool) {
        let author = staff_id(&pool).await;

        let campaign = CampaignsService::create(
            &pool,
            author,
            campaign_dto("Senhas seguras", CampaignCategory::General),
        )
        .await
        .unwrap();

        let updated = CampaignsService::update(
            &pool,
            campaign.id,
            UpdateCampaignDto {
                title: None,
                description: None,
                category: Some(CampaignCategory::DigitalSafety),
                is_active: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.category, CampaignCategory::DigitalSafety);
        assert_eq!(updated.title, "Senhas seguras");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_missing_campaign_is_not_found(pool: PgPool) {
        let err = CampaignsService::delete(&pool, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
