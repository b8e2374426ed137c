//! Shared utilities for the Vigia API.
//!
//! - [`errors`]: application error type and HTTP conversion
//! - [`jwt`]: access token creation and verification
//! - [`pagination`]: request pagination helpers
//! - [`password`]: password hashing and verification

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
