//! # Admin Authentication Providers
//!
//! Checks a username/password pair and returns the public record of the
//! matched admin.
//!
//! [`StaticCredentials`] matches against the `[admin]` list of the config
//! file by exact equality. Any hosted auth service can take its place by
//! implementing [`AuthProvider`].

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use milena_core::auth::match_credentials;
use milena_core::{AdminCredential, CoreError, CoreResult, SessionUser};

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The matched admin, or `CoreError::InvalidCredentials`.
    async fn authenticate(&self, username: &str, password: &str) -> CoreResult<SessionUser>;
}

/// Exact match on a fixed credential list.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    users: Vec<AdminCredential>,
}

impl StaticCredentials {
    pub fn new(users: Vec<AdminCredential>) -> Self {
        if users.is_empty() {
            warn!("No admin users configured; every login will fail");
        }
        StaticCredentials { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("users", &self.users.len())
            .finish()
    }
}

#[async_trait]
impl AuthProvider for StaticCredentials {
    async fn authenticate(&self, username: &str, password: &str) -> CoreResult<SessionUser> {
        match match_credentials(&self.users, username, password) {
            Some(credential) => {
                debug!(username = %username, "Credentials matched");
                Ok(credential.to_session_user(Utc::now()))
            }
            None => Err(CoreError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StaticCredentials {
        StaticCredentials::new(vec![AdminCredential {
            username: "milena".to_string(),
            password: "secreto".to_string(),
            name: "Milena".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_exact_match() {
        let user = provider().authenticate("milena", "secreto").await.unwrap();
        assert_eq!(user.username, "milena");
        assert_eq!(user.name, "Milena");
        assert!(user.logged_in_at.is_some());
    }

    #[tokio::test]
    async fn test_mismatch() {
        let p = provider();
        assert!(matches!(
            p.authenticate("milena", "SECRETO").await,
            Err(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            p.authenticate("Milena", "secreto").await,
            Err(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            p.authenticate(" milena", "secreto").await,
            Err(CoreError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_empty_list_rejects_everything() {
        let p = StaticCredentials::new(Vec::new());
        assert!(p.is_empty());
        assert!(p.authenticate("", "").await.is_err());
    }
}
