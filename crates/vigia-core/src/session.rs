//! Sessions and the activation gate.
//!
//! A [`Session`] is the in-memory union of an authenticated principal and an
//! active profile record. It is only ever built through the activation gate
//! in [`Session::from_profile`]: a record with `is_active = false` resolves
//! to no session at all, never to a session flagged inactive.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::FetchError;
use crate::manager::ProfileStore;
use crate::role::{Role, RoleRequirement};

/// The opaque authenticated identity issued by the identity provider,
/// independent of the application's own profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
}

/// The application-owned profile record, decoded and validated at the store
/// boundary. The core treats it as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

/// Data for a profile record created at sign-up. Records are always created
/// active; deactivation is an administrative action later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A materialized session. Replaced wholesale on every authentication
/// change, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub principal_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    /// The raw provider handle the session was built from.
    pub principal: Principal,
}

impl Session {
    /// The activation gate. Returns a session only for an active record;
    /// a deactivated principal is indistinguishable from an unauthenticated
    /// one.
    pub fn from_profile(principal: Principal, record: &ProfileRecord) -> Option<Session> {
        if !record.is_active {
            return None;
        }

        Some(Session {
            principal_id: principal.id,
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
            is_active: true,
            principal,
        })
    }

    /// Whether this session satisfies `requirement`. Refuses inactive
    /// sessions even though [`Session::from_profile`] never builds one; the
    /// evaluator does not trust stale session values.
    pub fn permits(&self, requirement: &RoleRequirement) -> bool {
        if !self.is_active {
            return false;
        }
        requirement.satisfied_by(self.role)
    }
}

/// The permission check. Total over its domain: no session means denied,
/// everything else defers to [`Session::permits`]. Pure and synchronous, so
/// it is safe to call on every routing decision.
pub fn has_permission(session: Option<&Session>, requirement: &RoleRequirement) -> bool {
    match session {
        Some(session) => session.permits(requirement),
        None => false,
    }
}

/// Fetches the profile for `principal` and runs it through the activation
/// gate. All store failures collapse to "no session": a fetch error is
/// recoverable (logged, retried on the next auth event), and a missing
/// record means the principal authenticated without ever completing
/// registration, which is treated as "not logged in" rather than an error.
pub async fn materialize<S: ProfileStore>(store: &S, principal: Principal) -> Option<Session> {
    let record = match store.get(principal.id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            warn!(principal_id = %principal.id, "authenticated principal has no profile record");
            return None;
        }
        Err(FetchError(reason)) => {
            error!(principal_id = %principal.id, %reason, "profile fetch failed");
            return None;
        }
    };

    Session::from_profile(principal, &record)
}
