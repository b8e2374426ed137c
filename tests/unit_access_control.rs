//! Access-control properties exercised through the public API of the core
//! crate, the way the server consumes it.

use uuid::Uuid;
use vigia::vigia_core::{
    Principal, ProfileRecord, Role, RoleRequirement, Session, has_permission,
};

fn record(role: Role, is_active: bool) -> ProfileRecord {
    ProfileRecord {
        id: Uuid::new_v4(),
        name: "Ana Souza".to_string(),
        email: "ana@escola.edu".to_string(),
        role,
        is_active,
    }
}

fn session(role: Role) -> Session {
    let record = record(role, true);
    let principal = Principal {
        id: record.id,
        email: record.email.clone(),
    };
    Session::from_profile(principal, &record).unwrap()
}

#[test]
fn role_hierarchy_is_total_and_ordered() {
    assert!(Role::Student < Role::Staff);
    assert!(Role::Staff < Role::Admin);
    assert_eq!(Role::Student.level(), 1);
    assert_eq!(Role::Staff.level(), 2);
    assert_eq!(Role::Admin.level(), 3);
}

#[test]
fn at_least_admits_higher_roles() {
    let staff_gate = RoleRequirement::AtLeast(Role::Staff);
    assert!(!staff_gate.satisfied_by(Role::Student));
    assert!(staff_gate.satisfied_by(Role::Staff));
    assert!(staff_gate.satisfied_by(Role::Admin));
}

#[test]
fn any_of_is_an_or_over_thresholds() {
    let gate = RoleRequirement::AnyOf(&[Role::Staff, Role::Admin]);
    assert!(!gate.satisfied_by(Role::Student));
    assert!(gate.satisfied_by(Role::Staff));
    assert!(gate.satisfied_by(Role::Admin));
}

#[test]
fn empty_any_of_denies_everyone() {
    let gate = RoleRequirement::AnyOf(&[]);
    for role in Role::ALL {
        assert!(!gate.satisfied_by(role));
    }
}

#[test]
fn no_session_has_no_permissions() {
    assert!(!has_permission(None, &RoleRequirement::AtLeast(Role::Student)));
    assert!(!has_permission(None, &RoleRequirement::AnyOf(&[Role::Admin])));
}

#[test]
fn sessions_carry_their_role_through_checks() {
    let admin = session(Role::Admin);
    assert!(has_permission(
        Some(&admin),
        &RoleRequirement::AtLeast(Role::Admin)
    ));

    let student = session(Role::Student);
    assert!(!has_permission(
        Some(&student),
        &RoleRequirement::AtLeast(Role::Staff)
    ));
    assert!(has_permission(
        Some(&student),
        &RoleRequirement::AtLeast(Role::Student)
    ));
}

#[test]
fn deactivated_records_never_become_sessions() {
    for role in Role::ALL {
        let record = record(role, false);
        let principal = Principal {
            id: record.id,
            email: record.email.clone(),
        };
        assert!(Session::from_profile(principal, &record).is_none());
    }
}

#[test]
fn stale_inactive_session_is_denied() {
    // A session constructed before deactivation must fail permission checks
    // once its is_active flag is stale.
    let mut session = session(Role::Admin);
    session.is_active = false;
    assert!(!session.permits(&RoleRequirement::AtLeast(Role::Student)));
}

#[test]
fn roles_parse_from_their_wire_names() {
    assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
    assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert!("guardian".parse::<Role>().is_err());
}
