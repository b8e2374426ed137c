//! Middleware and extractors for authentication and authorization.
//!
//! # Request flow
//!
//! 1. Client sends `Authorization: Bearer <token>`.
//! 2. [`auth::AuthUser`] validates the JWT and extracts claims — this is the
//!    principal handle.
//! 3. [`auth::CurrentSession`] re-fetches the profile record and runs it
//!    through the `vigia-core` activation gate, so a deactivated user is
//!    rejected even while holding a valid token.
//! 4. Role extractors ([`role::RequireStaff`], [`role::RequireAdmin`]) apply
//!    the hierarchy check on top.

pub mod auth;
pub mod role;
