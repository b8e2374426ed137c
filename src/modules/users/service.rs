use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{PaginatedUsersResponse, UpdateRoleDto, UpdateStatusDto, User, UserFilterParams};

const USER_COLUMNS: &str = "id, name, email, role, is_active, created_at";

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filters: &'a UserFilterParams) {
    let mut has_where = false;
    if let Some(role) = &filters.role {
        qb.push(" WHERE role = ").push_bind(role.as_str());
        has_where = true;
    }
    if let Some(name) = &filters.name {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("name ILIKE ").push_bind(format!("%{name}%"));
    }
}

pub struct UsersService;

impl UsersService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: UserFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count_query, &filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let limit = pagination.limit();
        let offset = pagination.offset();

        let mut query =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filters(&mut query, &filters);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let data: Vec<User> = query.build_query_as().fetch_all(db).await?;

        Ok(PaginatedUsersResponse {
            data,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_role(
        db: &PgPool,
        actor_id: Uuid,
        user_id: Uuid,
        dto: UpdateRoleDto,
    ) -> Result<User, AppError> {
        if actor_id == user_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Cannot change your own role"
            )));
        }

        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.role.as_str())
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Deactivation takes effect on the target's next request, since every
    /// request re-materializes its session from the profile record.
    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        actor_id: Uuid,
        user_id: Uuid,
        dto: UpdateStatusDto,
    ) -> Result<User, AppError> {
        if actor_id == user_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Cannot change your own account status"
            )));
        }

        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.is_active)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, actor_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if actor_id == user_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Cannot delete your own account"
            )));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use vigia_core::Role;

    async fn insert_user(pool: &PgPool, name: &str, email: &str, role: Role) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(role.as_str())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn list_filters_by_role_and_name(pool: PgPool) {
        insert_user(&pool, "Ana Souza", "ana@escola.edu", Role::Staff).await;
        insert_user(&pool, "Bruno Lima", "bruno@escola.edu", Role::Student).await;
        insert_user(&pool, "Carla Dias", "carla@escola.edu", Role::Staff).await;

        let response = UsersService::list(
            &pool,
            UserFilterParams {
                role: Some(Role::Staff),
                name: None,
            },
            PaginationParams::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.meta.total, 2);
        assert!(response.data.iter().all(|u| u.role == "staff"));

        let response = UsersService::list(
            &pool,
            UserFilterParams {
                role: None,
                name: Some("bru".to_string()),
            },
            PaginationParams::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.meta.total, 1);
        assert_eq!(response.data[0].name, "Bruno Lima");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn list_paginates(pool: PgPool) {
        for i in 0..5 {
            insert_user(
                &pool,
                &format!("User {i}"),
                &format!("user{i}@escola.edu"),
                Role::Student,
            )
            .await;
        }

        let response = UsersService::list(
            &pool,
            UserFilterParams::default(),
            PaginationParams {
                limit: Some(2),
                offset: Some(0),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.meta.total, 5);
        assert!(response.meta.has_more);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn get_missing_user_is_not_found(pool: PgPool) {
        let err = UsersService::get(&pool, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_role_promotes_user(pool: PgPool) {
        let admin = insert_user(&pool, "Admin", "admin@escola.edu", Role::Admin).await;
        let target = insert_user(&pool, "Ana", "ana@escola.edu", Role::Student).await;

        let user = UsersService::update_role(
            &pool,
            admin,
            target,
            UpdateRoleDto { role: Role::Staff },
        )
        .await
        .unwrap();

        assert_eq!(user.role, "staff");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_role_rejects_self(pool: PgPool) {
        let admin = insert_user(&pool, "Admin", "admin@escola.edu", Role::Admin).await;

        let err = UsersService::update_role(
            &pool,
            admin,
            admin,
            UpdateRoleDto { role: Role::Student },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_status_deactivates_user(pool: PgPool) {
        let admin = insert_user(&pool, "Admin", "admin@escola.edu", Role::Admin).await;
        let target = insert_user(&pool, "Ana", "ana@escola.edu", Role::Staff).await;

        let user = UsersService::update_status(
            &pool,
            admin,
            target,
            UpdateStatusDto { is_active: false },
        )
        .await
        .unwrap();

        assert!(!user.is_active);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_rejects_self(pool: PgPool) {
        let admin = insert_user(&pool, "Admin", "admin@escola.edu", Role::Admin).await;

        let err = UsersService::delete(&pool, admin, admin).await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err = UsersService::delete(&pool, admin, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let target = insert_user(&pool, "Ana", "ana@escola.edu", Role::Student).await;
        UsersService::delete(&pool, admin, target).await.unwrap();

        let err = UsersService::get(&pool, target).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
