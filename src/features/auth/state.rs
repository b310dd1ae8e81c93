//! Session context shared by every consumer of the client. It owns the
//! authenticated flag derived from the credential store plus the profile
//! fields of the signed-in user.
//!
//! Consistency is caller driven: the flag is only recomputed when
//! [`SessionContext::credential_changed`] runs. Every mutating operation here
//! funnels through it, but a credential written to the store behind the
//! context's back stays invisible until someone calls
//! [`SessionContext::resync_auth_flag`].

use crate::{
    errors::AppError,
    features::auth::{store::CredentialStore, types::UserProfile},
};
use secrecy::SecretString;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Point-in-time view of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub user_id: Option<i64>,
    pub username: String,
    pub is_admin: bool,
}

/// Cloneable handle to the session. All clones observe the same state.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionContext {
    /// Builds a context over `store` and derives the initial flag from it.
    pub fn new(store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        let (state, _) = watch::channel(SessionSnapshot::default());
        let session = Self {
            store,
            state: Arc::new(state),
        };
        session.resync_auth_flag()?;
        Ok(session)
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Recomputes `is_authenticated` from credential presence.
    pub fn resync_auth_flag(&self) -> Result<bool, AppError> {
        let present = self.store.has_credential()?;
        self.state.send_if_modified(|snapshot| {
            let changed = snapshot.is_authenticated != present;
            snapshot.is_authenticated = present;
            changed
        });
        debug!(is_authenticated = present, "auth flag resynced");
        Ok(present)
    }

    /// Single notification point for credential mutations.
    pub fn credential_changed(&self) -> Result<bool, AppError> {
        self.resync_auth_flag()
    }

    /// Stores the profile and persists `token` in one step after login.
    pub fn set_user(&self, profile: UserProfile, token: &SecretString) -> Result<(), AppError> {
        self.store.set(token)?;
        self.apply_profile(profile);
        self.credential_changed()?;
        info!(username = %self.username(), "session established");
        Ok(())
    }

    /// Refreshes profile fields without touching the credential.
    pub fn update_profile(&self, profile: UserProfile) {
        self.apply_profile(profile);
    }

    /// Resets the profile and removes the credential.
    ///
    /// The profile is cleared even when the store fails; the store error is
    /// returned afterwards.
    pub fn logout(&self) -> Result<(), AppError> {
        self.apply_profile(UserProfile::default());
        self.store.clear()?;
        self.credential_changed()?;
        info!("session cleared");
        Ok(())
    }

    /// Drops the credential but keeps profile fields, e.g. after a manual clear.
    pub fn clear_credential(&self) -> Result<(), AppError> {
        self.store.clear()?;
        self.credential_changed()?;
        Ok(())
    }

    /// Restores in-memory defaults. The store is left as is.
    pub fn reset(&self) {
        self.state.send_replace(SessionSnapshot::default());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that wakes whenever the session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn user_id(&self) -> Option<i64> {
        self.state.borrow().user_id
    }

    pub fn username(&self) -> String {
        self.state.borrow().username.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin
    }

    fn apply_profile(&self, profile: UserProfile) {
        self.state.send_if_modified(|snapshot| {
            let changed = snapshot.user_id != profile.id
                || snapshot.username != profile.username
                || snapshot.is_admin != profile.is_admin;
            snapshot.user_id = profile.id;
            snapshot.username = profile.username;
            snapshot.is_admin = profile.is_admin;
            changed
        });
    }
}
