//! # Vigia Core
//!
//! Access-control core for the Vigia school safety platform.
//!
//! This crate owns the two pieces of logic every other part of the system
//! leans on:
//!
//! - the **role hierarchy** (`student < staff < admin`) and the permission
//!   check built on it ([`Role`], [`RoleRequirement`], [`has_permission`]);
//! - **session materialization**: turning an authentication event plus a
//!   fetched profile record into an authoritative [`Session`] (or no
//!   session), applying the activation gate along the way.
//!
//! The crate knows nothing about HTTP or SQL. External collaborators are
//! expressed as capability traits ([`ProfileStore`], [`NotificationGateway`])
//! so the same evaluator drives the REST API's request gate, the interactive
//! console, and the unit tests.
//!
//! # Example
//!
//! ```ignore
//! use vigia_core::{has_permission, Role, RoleRequirement};
//!
//! let allowed = has_permission(
//!     session.as_ref(),
//!     &RoleRequirement::AtLeast(Role::Staff),
//! );
//! ```

pub mod error;
pub mod manager;
pub mod role;
pub mod session;

pub use error::{FetchError, SignUpError, WriteError};
pub use manager::{
    AuthEvent, NotificationGateway, PermissionOutcome, ProfileStore, SessionManager, SignUpData,
};
pub use role::{Role, RoleRequirement, UnknownRoleError};
pub use session::{has_permission, materialize, NewProfile, Principal, ProfileRecord, Session};
