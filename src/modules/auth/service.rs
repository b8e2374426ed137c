use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;
use vigia_core::{Principal, ProfileStore, Role, Session, materialize};

use crate::config::jwt::JwtConfig;
use crate::db::PgProfileStore;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Sign-up. Creates the profile record (always active) and materializes
    /// the first session from it. Unlike the login path, store failures here
    /// propagate: the caller is mid-onboarding and must be told.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn register(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: RegisterRequestDto,
    ) -> Result<AuthResponse, AppError> {
        if dto.role == Role::Admin {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Administrator accounts are created via the CLI"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO users (name, email, password, role, is_active)
               VALUES ($1, $2, $3, $4, TRUE)
               RETURNING id"#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("Email is already registered"));
            }
            AppError::from(e)
        })?;

        // Re-fetch through the store boundary and run the record through the
        // same activation gate every sign-in uses.
        let store = PgProfileStore::new(db.clone());
        let record = store
            .get(user_id)
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("{}", e)))?
            .ok_or_else(|| {
                AppError::internal(anyhow::anyhow!("profile record missing after sign-up"))
            })?;

        let principal = Principal {
            id: user_id,
            email: record.email.clone(),
        };
        let session = Session::from_profile(principal, &record).ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("profile record inactive after sign-up"))
        })?;

        let access_token =
            create_access_token(user_id, &session.email, session.role, jwt_config)?;

        Ok(AuthResponse {
            access_token,
            user: session.into(),
        })
    }

    /// Login. A wrong password, a missing profile record and a deactivated
    /// account are deliberately indistinguishable to the caller.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let invalid = || AppError::unauthorized(anyhow::anyhow!("Invalid email or password"));

        let row = sqlx::query_as::<_, (Uuid, Option<String>)>(
            "SELECT id, password FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(invalid)?;

        let (user_id, stored_hash) = row;
        let stored_hash = stored_hash.ok_or_else(invalid)?;

        if !verify_password(&dto.password, &stored_hash)? {
            return Err(invalid());
        }

        let store = PgProfileStore::new(db.clone());
        let principal = Principal {
            id: user_id,
            email: dto.email,
        };
        let session = materialize(&store, principal).await.ok_or_else(invalid)?;

        let access_token =
            create_access_token(user_id, &session.email, session.role, jwt_config)?;

        Ok(AuthResponse {
            access_token,
            user: session.into(),
        })
    }
}
