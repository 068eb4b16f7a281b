//! # Admin Session Persistence
//!
//! Where the logged-in admin record lives between runs, and whether a stored
//! record is still accepted.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  startup ──► SessionStorage::load ──► SessionValidator::accepts ──┐    │
//! │                                                                    │    │
//! │                       ┌────────── yes ◄───────────────────────────┤    │
//! │                       ▼                                   no ──► clear  │
//! │                   LoggedIn                                              │
//! │                                                                         │
//! │  login  ──► SessionStorage::save(user)                                 │
//! │  logout ──► SessionStorage::clear()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file backend writes one JSON document holding `{username, name,
//! logged_in_at}`. The password is never persisted.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use milena_core::SessionUser;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Storage
// =============================================================================

/// Persists at most one session record.
pub trait SessionStorage: Send + Sync {
    /// The stored record, if any.
    fn load(&self) -> SessionResult<Option<SessionUser>>;

    /// Replaces the stored record.
    fn save(&self, user: &SessionUser) -> SessionResult<()>;

    /// Removes the stored record. Clearing an empty store is not an error.
    fn clear(&self) -> SessionResult<()>;
}

/// Session record stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> SessionResult<Option<SessionUser>> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No stored session");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let user = serde_json::from_str(&contents)?;
        Ok(Some(user))
    }

    fn save(&self, user: &SessionUser) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, contents)?;

        info!(path = ?self.path, username = %user.username, "Session saved");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session record kept in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    user: Mutex<Option<SessionUser>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `user` already stored.
    pub fn with_user(user: SessionUser) -> Self {
        MemorySessionStorage {
            user: Mutex::new(Some(user)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> SessionResult<Option<SessionUser>> {
        Ok(self.user.lock().expect("Session mutex poisoned").clone())
    }

    fn save(&self, user: &SessionUser) -> SessionResult<()> {
        *self.user.lock().expect("Session mutex poisoned") = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.user.lock().expect("Session mutex poisoned") = None;
        Ok(())
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Decides whether a stored record still grants access.
pub trait SessionValidator: Send + Sync {
    fn accepts(&self, user: &SessionUser, now: DateTime<Utc>) -> bool;
}

/// Accepts any stored record, forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustStoredSession;

impl SessionValidator for TrustStoredSession {
    fn accepts(&self, _user: &SessionUser, _now: DateTime<Utc>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            username: "milena".to_string(),
            name: "Milena".to_string(),
            logged_in_at: None,
        }
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("data").join("session.json"));

        assert_eq!(storage.load().unwrap(), None);

        storage.save(&user()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(user()));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_never_writes_password() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        storage.save(&user()).unwrap();

        let contents = std::fs::read_to_string(storage.path()).unwrap();
        assert!(contents.contains("\"username\""));
        assert!(!contents.contains("password"));
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("missing.json"));
        assert!(storage.clear().is_ok());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(matches!(storage.load(), Err(SessionError::Json(_))));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemorySessionStorage::with_user(user());
        assert_eq!(storage.load().unwrap(), Some(user()));
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_trust_stored_session() {
        assert!(TrustStoredSession.accepts(&user(), Utc::now()));
    }
}
