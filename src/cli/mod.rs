//! Administrative tooling: admin account creation, database seeding and an
//! interactive session console.

pub mod console;
pub mod seeder;

use sqlx::PgPool;
use uuid::Uuid;
use vigia_core::Role;

use crate::utils::password::hash_password;

/// Creates an administrator account. Administrators cannot self-register
/// through the API, this is the only way to mint one.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let hashed_password = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role, is_active)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed_password)
    .bind(Role::Admin.as_str())
    .fetch_optional(db)
    .await?;

    match user_id {
        Some(id) => Ok(id),
        None => Err("User with this email already exists".into()),
    }
}
