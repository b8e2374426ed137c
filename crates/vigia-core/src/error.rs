//! Error taxonomy of the access-control core.
//!
//! Store failures are caught at the materialization boundary and collapse to
//! "no session"; they only propagate out of [`SessionManager::register`]
//! (the caller is mid-onboarding and must be told), which is why the sign-up
//! path gets its own error type.
//!
//! [`SessionManager::register`]: crate::manager::SessionManager::register

use thiserror::Error;

/// The profile store failed to read a record (timeout, network, backend
/// error). "Record absent" is not a fetch error; that is a successful read
/// returning nothing.
#[derive(Debug, Clone, Error)]
#[error("profile fetch failed: {0}")]
pub struct FetchError(pub String);

/// The profile store rejected a write.
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// A record with this id (or a uniqueness constraint on it) already
    /// exists.
    #[error("profile record already exists")]
    Conflict,
    #[error("profile write failed: {0}")]
    Store(String),
}

/// Failure of the explicit sign-up flow. Unlike normal session refresh,
/// these are surfaced to the caller rather than collapsed into "no session".
#[derive(Debug, Error)]
pub enum SignUpError {
    #[error(transparent)]
    Write(#[from] WriteError),
    /// The record was unreadable immediately after the write.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The record was absent or inactive right after creation.
    #[error("profile record inconsistent after sign-up")]
    Inconsistent,
}
