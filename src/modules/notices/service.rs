use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateNoticeDto, Notice, UpdateNoticeDto};

const NOTICE_COLUMNS: &str = "id, title, content, is_active, author_id, created_at";

pub struct NoticesService;

impl NoticesService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateNoticeDto,
    ) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"INSERT INTO notices (title, content, author_id)
               VALUES ($1, $2, $3)
               RETURNING {NOTICE_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(author_id)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    /// The board: active notices only, newest first.
    #[instrument(skip(db))]
    pub async fn list_active(db: &PgPool) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE is_active ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(notices)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        notice_id: Uuid,
        dto: UpdateNoticeDto,
    ) -> Result<Notice, AppError> {
        sqlx::query_as::<_, Notice>(&format!(
            r#"UPDATE notices
               SET title = COALESCE($1, title),
                   content = COALESCE($2, content),
                   is_active = COALESCE($3, is_active)
               WHERE id = $4
               RETURNING {NOTICE_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.is_active)
        .bind(notice_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notice not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, notice_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(notice_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Notice not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
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

    #[sqlx::test(migrations = "./migrations")]
    async fn board_hides_deactivated_notices(pool: PgPool) {
        let author = staff_id(&pool).await;

        let kept = NoticesService::create(
            &pool,
            author,
            CreateNoticeDto {
                title: "Simulado de evacuação".to_string(),
                content: "Sexta-feira às 10h.".to_string(),
            },
        )
        .await
        .unwrap();

        let hidden = NoticesService::create(
            &pool,
            author,
            CreateNoticeDto {
                title: "Rascunho".to_string(),
                content: "Ainda em escrita.".to_string(),
            },
        )
        .await
        .unwrap();

        NoticesService::update(
            &pool,
            hidden.id,
            UpdateNoticeDto {
                title: None,
                content: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

        let board = NoticesService::list_active(&pool).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, kept.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_is_partial(pool: PgPool) {
        let author = staff_id(&pool).await;

        let notice = NoticesService::create(
            &pool,
            author,
            CreateNoticeDto {
                title: "Título".to_string(),
                content: "Conteúdo original.".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = NoticesService::update(
            &pool,
            notice.id,
            UpdateNoticeDto {
                title: Some("Título revisado".to_string()),
                content: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Título revisado");
        assert_eq!(updated.content, "Conteúdo original.");
        assert!(updated.is_active);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_missing_notice_is_not_found(pool: PgPool) {
        let err = NoticesService::delete(&pool, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
