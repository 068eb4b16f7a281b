//! # Session State
//!
//! The admin gate plus the storage it is persisted to.
//!
//! The gate is only flipped after storage accepted the change, so the file
//! and the in-memory state agree after every command.

use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use milena_core::auth::AdminAuth;
use milena_core::{CoreError, CoreResult, SessionUser};

use crate::session::{SessionResult, SessionStorage, SessionValidator};

#[derive(Clone)]
pub struct SessionState {
    auth: Arc<Mutex<AdminAuth>>,
    storage: Arc<dyn SessionStorage>,
    validator: Arc<dyn SessionValidator>,
}

impl SessionState {
    /// Rebuilds the gate from storage.
    ///
    /// An unreadable record starts logged out; a record the validator
    /// refuses is also cleared from storage.
    pub fn restore(storage: Arc<dyn SessionStorage>, validator: Arc<dyn SessionValidator>) -> Self {
        let stored = match storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Stored session unreadable, starting logged out");
                None
            }
        };

        let accepted = match stored {
            Some(user) if validator.accepts(&user, Utc::now()) => {
                info!(username = %user.username, "Admin session restored");
                Some(user)
            }
            Some(user) => {
                info!(username = %user.username, "Stored session rejected");
                if let Err(e) = storage.clear() {
                    warn!(error = %e, "Failed to clear rejected session");
                }
                None
            }
            None => None,
        };

        SessionState {
            auth: Arc::new(Mutex::new(AdminAuth::restore(accepted))),
            storage,
            validator,
        }
    }

    /// Executes a function with read access to the admin page state.
    pub fn with_auth<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AdminAuth) -> R,
    {
        let auth = self.auth.lock().expect("Session mutex poisoned");
        f(&auth)
    }

    /// Executes a function with write access to the admin page state.
    pub fn with_auth_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AdminAuth) -> R,
    {
        let mut auth = self.auth.lock().expect("Session mutex poisoned");
        f(&mut auth)
    }

    /// Persists `user` and opens the gate.
    pub fn start(&self, user: SessionUser) -> SessionResult<()> {
        self.storage.save(&user)?;
        self.with_auth_mut(|auth| auth.logged_in(user));
        Ok(())
    }

    /// Clears storage, closes the gate and resets the login fields.
    pub fn end(&self) -> SessionResult<()> {
        self.storage.clear()?;
        self.with_auth_mut(|auth| auth.logged_out());
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.with_auth(|auth| auth.gate().is_logged_in())
    }

    /// The logged-in admin, checked against the validator again.
    pub fn require_user(&self) -> CoreResult<SessionUser> {
        let user = self
            .with_auth(|auth| auth.gate().user().cloned())
            .ok_or(CoreError::NotLoggedIn)?;

        if self.validator.accepts(&user, Utc::now()) {
            Ok(user)
        } else {
            Err(CoreError::NotLoggedIn)
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStorage, TrustStoredSession};
    use chrono::DateTime;

    struct RejectAll;

    impl SessionValidator for RejectAll {
        fn accepts(&self, _user: &SessionUser, _now: DateTime<Utc>) -> bool {
            false
        }
    }

    fn user() -> SessionUser {
        SessionUser {
            username: "milena".to_string(),
            name: "Milena".to_string(),
            logged_in_at: None,
        }
    }

    #[test]
    fn test_restore_logged_in() {
        let storage = Arc::new(MemorySessionStorage::with_user(user()));
        let state = SessionState::restore(storage, Arc::new(TrustStoredSession));

        assert!(state.is_logged_in());
        assert_eq!(state.require_user().unwrap(), user());
    }

    #[test]
    fn test_restore_logged_out() {
        let state = SessionState::restore(
            Arc::new(MemorySessionStorage::new()),
            Arc::new(TrustStoredSession),
        );
        assert!(!state.is_logged_in());
        assert!(matches!(state.require_user(), Err(CoreError::NotLoggedIn)));
    }

    #[test]
    fn test_rejected_record_is_cleared() {
        let storage = Arc::new(MemorySessionStorage::with_user(user()));
        let state = SessionState::restore(storage.clone(), Arc::new(RejectAll));

        assert!(!state.is_logged_in());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_start_and_end() {
        let storage = Arc::new(MemorySessionStorage::new());
        let state = SessionState::restore(storage.clone(), Arc::new(TrustStoredSession));

        state.start(user()).unwrap();
        assert!(state.is_logged_in());
        assert_eq!(storage.load().unwrap(), Some(user()));

        state.with_auth_mut(|auth| auth.form_mut().username = "milena".to_string());
        state.end().unwrap();
        assert!(!state.is_logged_in());
        assert_eq!(storage.load().unwrap(), None);
        assert!(state.with_auth(|auth| auth.form().username.is_empty()));
    }
}
