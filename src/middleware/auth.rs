use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;
use vigia_core::{Principal, Session, materialize};

use crate::db::PgProfileStore;
use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the JWT and provides the authenticated
/// principal's claims. No profile data is trusted from the token beyond the
/// principal id and email; role and activation status come from the store.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn principal(&self) -> Result<Principal, AppError> {
        Ok(Principal {
            id: self.user_id()?,
            email: self.0.email.clone(),
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Extractor that materializes the caller's session through the activation
/// gate on every request. Fetch failure, a missing profile record, and a
/// deactivated record all reject identically: the caller is simply not
/// signed in.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let principal = auth_user.principal()?;

        let store = PgProfileStore::new(state.db.clone());
        let session = materialize(&store, principal)
            .await
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Not signed in")))?;

        Ok(CurrentSession(session))
    }
}
