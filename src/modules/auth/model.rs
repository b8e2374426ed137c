use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;
use vigia_core::{Role, Session};

/// JWT claims. The token is the principal handle: only `sub` and `email`
/// are trusted from it, role and activation status are re-read from the
/// profile record on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Requested role. Only `student` and `staff` can self-register;
    /// administrator accounts are created via the CLI.
    #[schema(value_type = String, example = "student")]
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// The caller-visible projection of a materialized session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "staff")]
    pub role: Role,
    pub is_active: bool,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.principal_id,
            name: session.name,
            email: session.email,
            role: session.role,
            is_active: session.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: SessionResponse,
}
