use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{RegisterVisitorDto, Visitor, VisitorFilterParams};

const VISITOR_COLUMNS: &str =
    "id, name, document, purpose, entry_time, exit_time, registered_by";

pub struct VisitorsService;

impl VisitorsService {
    #[instrument(skip(db, dto))]
    pub async fn register(
        db: &PgPool,
        registered_by: Uuid,
        dto: RegisterVisitorDto,
    ) -> Result<Visitor, AppError> {
        let visitor = sqlx::query_as::<_, Visitor>(&format!(
            r#"INSERT INTO visitors (name, document, purpose, registered_by)
               VALUES ($1, $2, $3, $4)
               RETURNING {VISITOR_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(&dto.document)
        .bind(&dto.purpose)
        .bind(registered_by)
        .fetch_one(db)
        .await?;

        Ok(visitor)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: VisitorFilterParams,
    ) -> Result<Vec<Visitor>, AppError> {
        let query = if filters.open.unwrap_or(false) {
            format!(
                "SELECT {VISITOR_COLUMNS} FROM visitors WHERE exit_time IS NULL \
                 ORDER BY entry_time DESC"
            )
        } else {
            format!("SELECT {VISITOR_COLUMNS} FROM visitors ORDER BY entry_time DESC")
        };

        let visitors = sqlx::query_as::<_, Visitor>(&query).fetch_all(db).await?;
        Ok(visitors)
    }

    /// Check-out stamps the exit time exactly once; the `exit_time IS NULL`
    /// guard makes a second check-out a conflict rather than an overwrite.
    #[instrument(skip(db))]
    pub async fn checkout(db: &PgPool, visitor_id: Uuid) -> Result<Visitor, AppError> {
        let checked_out = sqlx::query_as::<_, Visitor>(&format!(
            r#"UPDATE visitors SET exit_time = NOW()
               WHERE id = $1 AND exit_time IS NULL
               RETURNING {VISITOR_COLUMNS}"#
        ))
        .bind(visitor_id)
        .fetch_optional(db)
        .await?;

        if let Some(visitor) = checked_out {
            return Ok(visitor);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM visitors WHERE id = $1)",
        )
        .bind(visitor_id)
        .fetch_one(db)
        .await?;

        if exists {
            Err(AppError::conflict(anyhow::anyhow!(
                "Visitor already checked out"
            )))
        } else {
            Err(AppError::not_found(anyhow::anyhow!("Visitor not found")))
        }
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

    fn visitor_dto(name: &str) -> RegisterVisitorDto {
        RegisterVisitorDto {
            name: name.to_string(),
            document: "12.345.678-9".to_string(),
            purpose: Some("Reunião com a coordenação".to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn register_stamps_entry_time(pool: PgPool) {
        let staff = staff_id(&pool).await;

        let visitor = VisitorsService::register(&pool, staff, visitor_dto("João Pereira"))
            .await
            .unwrap();

        assert_eq!(visitor.registered_by, staff);
        assert!(visitor.exit_time.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn open_filter_excludes_checked_out(pool: PgPool) {
        let staff = staff_id(&pool).await;

        let gone = VisitorsService::register(&pool, staff, visitor_dto("João"))
            .await
            .unwrap();
        VisitorsService::register(&pool, staff, visitor_dto("Maria"))
            .await
            .unwrap();

        VisitorsService::checkout(&pool, gone.id).await.unwrap();

        let open = VisitorsService::list(&pool, VisitorFilterParams { open: Some(true) })
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "Maria");

        let all = VisitorsService::list(&pool, VisitorFilterParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn second_checkout_conflicts(pool: PgPool) {
        let staff = staff_id(&pool).await;

        let visitor = VisitorsService::register(&pool, staff, visitor_dto("João"))
            .await
            .unwrap();

        let checked_out = VisitorsService::checkout(&pool, visitor.id).await.unwrap();
        assert!(checked_out.exit_time.is_some());

        let err = VisitorsService::checkout(&pool, visitor.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = VisitorsService::checkout(&pool, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
