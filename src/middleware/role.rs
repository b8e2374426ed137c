//! Role-based authorization extractors.
//!
//! Thin wrappers over the `vigia-core` hierarchy check. Each extractor
//! materializes the session first (activation gate included) and then
//! demands a minimum role; a session that falls short gets 403.

use axum::{extract::FromRequestParts, http::request::Parts};
use vigia_core::{Role, RoleRequirement, Session};

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Requirement shared by the staff-facing surfaces (notices, visitors,
/// campaigns, alerts, report triage).
pub const STAFF_OR_ADMIN: RoleRequirement = RoleRequirement::AnyOf(&[Role::Staff, Role::Admin]);

/// Check a session against a requirement, mapping denial to 403.
pub fn check_requirement(
    session: &Session,
    requirement: &RoleRequirement,
) -> Result<(), AppError> {
    if !session.permits(requirement) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required role: {:?}, but user has role: {}",
            requirement,
            session.role
        )));
    }

    Ok(())
}

/// Extractor for staff-level access (staff or admin).
#[derive(Debug, Clone)]
pub struct RequireStaff(pub Session);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        check_requirement(&session, &STAFF_OR_ADMIN)?;

        Ok(RequireStaff(session))
    }
}

/// Extractor for admin-only access.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        check_requirement(&session, &RoleRequirement::AtLeast(Role::Admin))?;

        Ok(RequireAdmin(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use vigia_core::Principal;

    fn session(role: Role) -> Session {
        let id = Uuid::new_v4();
        Session {
            principal_id: id,
            name: "Test User".to_string(),
            email: "test@escola.edu".to_string(),
            role,
            is_active: true,
            principal: Principal {
                id,
                email: "test@escola.edu".to_string(),
            },
        }
    }

    #[test]
    fn staff_requirement_follows_hierarchy() {
        let req = RoleRequirement::AtLeast(Role::Staff);
        assert!(check_requirement(&session(Role::Admin), &req).is_ok());
        assert!(check_requirement(&session(Role::Staff), &req).is_ok());
        assert!(check_requirement(&session(Role::Student), &req).is_err());
    }

    #[test]
    fn admin_requirement_excludes_staff() {
        let req = RoleRequirement::AtLeast(Role::Admin);
        assert!(check_requirement(&session(Role::Admin), &req).is_ok());
        assert!(check_requirement(&session(Role::Staff), &req).is_err());
        assert!(check_requirement(&session(Role::Student), &req).is_err());
    }

    #[test]
    fn staff_or_admin_set_is_an_or() {
        assert!(check_requirement(&session(Role::Staff), &STAFF_OR_ADMIN).is_ok());
        assert!(check_requirement(&session(Role::Admin), &STAFF_OR_ADMIN).is_ok());
        assert!(check_requirement(&session(Role::Student), &STAFF_OR_ADMIN).is_err());
    }

    #[test]
    fn denial_maps_to_forbidden() {
        let err =
            check_requirement(&session(Role::Student), &RoleRequirement::AtLeast(Role::Admin))
                .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}
