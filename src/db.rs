//! PostgreSQL-backed profile store.
//!
//! Adapts the `users` table to the [`ProfileStore`] capability that
//! `vigia-core` materializes sessions from. Rows are decoded into strongly
//! typed [`ProfileRecord`]s at this boundary; a row carrying an unknown role
//! string is reported as a fetch failure, never passed through untyped.

use sqlx::PgPool;
use uuid::Uuid;
use vigia_core::{FetchError, NewProfile, ProfileRecord, ProfileStore, Role, WriteError};

#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    is_active: bool,
}

impl ProfileRow {
    fn decode(self) -> Result<ProfileRecord, FetchError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e| FetchError(format!("invalid profile record: {}", e)))?;

        Ok(ProfileRecord {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            is_active: self.is_active,
        })
    }
}

impl ProfileStore for PgProfileStore {
    async fn get(&self, id: Uuid) -> Result<Option<ProfileRecord>, FetchError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, name, email, role, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FetchError(e.to_string()))?;

        row.map(ProfileRow::decode).transpose()
    }

    async fn create(&self, id: Uuid, profile: NewProfile) -> Result<(), WriteError> {
        sqlx::query(
            r#"INSERT INTO users (id, name, email, role, is_active)
               VALUES ($1, $2, $3, $4, TRUE)"#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return WriteError::Conflict;
            }
            WriteError::Store(e.to_string())
        })?;

        Ok(())
    }
}
