//! Role hierarchy and permission requirements.
//!
//! Roles form a fixed total order: `Student < Staff < Admin`. The order is
//! the only semantic meaning a role carries; every permission decision in the
//! system reduces to comparing hierarchy levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user role, ordered by privilege.
///
/// The derived `Ord` follows declaration order, so
/// `Role::Student < Role::Staff < Role::Admin` holds by construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
    Admin,
}

impl Role {
    /// Hierarchy rank: student = 1, staff = 2, admin = 3.
    pub fn level(self) -> u8 {
        match self {
            Role::Student => 1,
            Role::Staff => 2,
            Role::Admin => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    pub const ALL: [Role; 3] = [Role::Student, Role::Staff, Role::Admin];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when decoding a role string that is not part of the hierarchy.
///
/// Unknown roles are a decode-time error at the store boundary, never a
/// runtime lookup failure inside the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRoleError(other.to_string())),
        }
    }
}

/// What a protected operation demands of the caller's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// The caller's role must be at least this level.
    AtLeast(Role),
    /// The caller's role must reach at least one of these levels. Each
    /// member is compared independently (logical OR), so `{staff, admin}`
    /// is satisfied by a staff session even though it does not reach admin.
    /// An empty set is satisfiable by no one.
    AnyOf(&'static [Role]),
}

impl RoleRequirement {
    /// Whether `role` satisfies this requirement.
    pub fn satisfied_by(&self, role: Role) -> bool {
        match self {
            RoleRequirement::AtLeast(required) => role.level() >= required.level(),
            RoleRequirement::AnyOf(set) => set.iter().any(|r| role.level() >= r.level()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_levels() {
        assert_eq!(Role::Student.level(), 1);
        assert_eq!(Role::Staff.level(), 2);
        assert_eq!(Role::Admin.level(), 3);
    }

    #[test]
    fn hierarchy_total_order() {
        assert!(Role::Student < Role::Staff);
        assert!(Role::Staff < Role::Admin);
        for role in Role::ALL {
            assert!(role.level() > 0);
        }
    }

    #[test]
    fn parse_known_roles() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn parse_unknown_role_is_an_error() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRoleError("superuser".to_string()));
    }

    #[test]
    fn serde_round_trip_uses_lowercase() {
        let json = serde_json::to_string(&Role::Staff).unwrap();
        assert_eq!(json, "\"staff\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Staff);
    }

    #[test]
    fn at_least_compares_levels() {
        for user in Role::ALL {
            for required in Role::ALL {
                assert_eq!(
                    RoleRequirement::AtLeast(required).satisfied_by(user),
                    user.level() >= required.level()
                );
            }
        }
    }

    #[test]
    fn any_of_is_an_or_over_the_set() {
        let req = RoleRequirement::AnyOf(&[Role::Staff, Role::Admin]);
        assert!(!req.satisfied_by(Role::Student));
        assert!(req.satisfied_by(Role::Staff));
        assert!(req.satisfied_by(Role::Admin));
    }

    #[test]
    fn empty_set_denies_everyone() {
        let req = RoleRequirement::AnyOf(&[]);
        for role in Role::ALL {
            assert!(!req.satisfied_by(role));
        }
    }
}
