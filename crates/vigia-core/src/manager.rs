//! Session lifecycle management.
//!
//! [`SessionManager`] owns the single mutable cell of the access-control
//! core: the current session. Authentication-change events go in, a
//! materialized `Option<Session>` comes out through a watch channel that
//! interested call sites can read synchronously or subscribe to.
//!
//! Ordering guarantee: every event is tagged with a monotonically increasing
//! sequence number when it arrives. A fetch that resolves after a newer
//! event has already been published is discarded, so a slow stale fetch can
//! never clobber a fresher session value (last-event-wins). Superseded
//! fetches are not cancelled; they run to completion and their results are
//! dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::{FetchError, SignUpError, WriteError};
use crate::role::{Role, RoleRequirement};
use crate::session::{NewProfile, Principal, ProfileRecord, Session, has_permission, materialize};

/// Read/write access to profile records, as the core needs it from the
/// document store. Read/write correctness is the store's responsibility.
pub trait ProfileStore: Send + Sync {
    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<ProfileRecord>, FetchError>> + Send;

    fn create(
        &self,
        id: Uuid,
        profile: NewProfile,
    ) -> impl Future<Output = Result<(), WriteError>> + Send;
}

/// Result of a notification-permission request. Purely advisory; the core
/// ignores it beyond a debug log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    Unavailable,
}

/// Capability for requesting permission to deliver notifications to the
/// signed-in user.
pub trait NotificationGateway: Send + Sync {
    fn request(&self) -> impl Future<Output = PermissionOutcome> + Send;
}

/// A gateway for environments with no notification channel (tests, the
/// terminal console).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifications;

impl NotificationGateway for NoopNotifications {
    async fn request(&self) -> PermissionOutcome {
        PermissionOutcome::Unavailable
    }
}

/// An authentication-change event from the identity provider.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(Principal),
    SignedOut,
}

/// Profile data supplied by the user at sign-up. The email comes from the
/// principal, not from the form.
#[derive(Debug, Clone)]
pub struct SignUpData {
    pub name: String,
    pub role: Role,
}

/// The session materializer. One instance per running application; all
/// writes to the current session go through it.
#[derive(Debug)]
pub struct SessionManager<S, N = NoopNotifications> {
    store: S,
    notifier: Arc<N>,
    seq: AtomicU64,
    published_seq: Mutex<u64>,
    tx: watch::Sender<Option<Session>>,
}

impl<S> SessionManager<S, NoopNotifications>
where
    S: ProfileStore,
{
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, NoopNotifications)
    }
}

impl<S, N> SessionManager<S, N>
where
    S: ProfileStore,
    N: NotificationGateway + 'static,
{
    pub fn with_notifier(store: S, notifier: N) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            store,
            notifier: Arc::new(notifier),
            seq: AtomicU64::new(0),
            published_seq: Mutex::new(0),
            tx,
        }
    }

    /// Processes one authentication-change event to completion and publishes
    /// its result, unless a newer event finished first. Returns the session
    /// this event materialized (which may differ from [`current`] when the
    /// event was superseded).
    ///
    /// [`current`]: SessionManager::current
    pub async fn apply(&self, event: AuthEvent) -> Option<Session> {
        let seq = self.next_seq();

        let session = match event {
            AuthEvent::SignedOut => None,
            AuthEvent::SignedIn(principal) => materialize(&self.store, principal).await,
        };

        if self.publish(seq, session.clone()) && session.is_some() {
            self.request_notification_permission();
        }

        session
    }

    /// Sign-up: unconditionally creates the profile record for `principal`
    /// (active, with the chosen role), then re-fetches it and materializes a
    /// session through the same activation gate as [`apply`].
    ///
    /// Unlike normal refresh, failures here propagate: the caller is in the
    /// middle of an onboarding flow and must be told.
    ///
    /// [`apply`]: SessionManager::apply
    pub async fn register(
        &self,
        principal: Principal,
        data: SignUpData,
    ) -> Result<Session, SignUpError> {
        let seq = self.next_seq();

        self.store
            .create(
                principal.id,
                NewProfile {
                    name: data.name,
                    email: principal.email.clone(),
                    role: data.role,
                },
            )
            .await?;

        let record = self
            .store
            .get(principal.id)
            .await?
            .ok_or(SignUpError::Inconsistent)?;

        let session =
            Session::from_profile(principal, &record).ok_or(SignUpError::Inconsistent)?;

        if self.publish(seq, Some(session.clone())) {
            self.request_notification_permission();
        }

        Ok(session)
    }

    /// Synchronous read of the latest published session.
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Subscribe to session transitions.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Permission check against the current session.
    pub fn has_permission(&self, requirement: &RoleRequirement) -> bool {
        has_permission(self.tx.borrow().as_ref(), requirement)
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publishes `session` unless a newer event already published. Returns
    /// whether the value was accepted.
    fn publish(&self, seq: u64, session: Option<Session>) -> bool {
        let mut published = self
            .published_seq
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if seq < *published {
            debug!(seq, published = *published, "discarding superseded session result");
            return false;
        }

        *published = seq;
        self.tx.send_replace(session);
        true
    }

    /// Best-effort, fire-and-forget. The outcome never affects the session.
    fn request_notification_permission(&self) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let outcome = notifier.request().await;
            debug!(?outcome, "notification permission request finished");
        });
    }
}
