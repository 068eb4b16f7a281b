//! # Admin Auth Gate
//!
//! The two-state gate in front of the admin dashboard.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   restore(None) ─►┌───────────┐   login(user)   ┌────────────────┐      │
//! │                   │ LoggedOut │ ──────────────► │ LoggedIn(user) │      │
//! │                   │           │ ◄────────────── │                │      │
//! │                   └───────────┘     logout()    └────────────────┘      │
//! │                         │                               ▲               │
//! │   credential mismatch ──┘ (stays LoggedOut)             │               │
//! │                                                         │               │
//! │   restore(Some(user)) ──────────────────────────────────┘               │
//! │   (stored record trusted as-is, no expiry)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checking a password and persisting the record are the app layer's job;
//! this module only decides what state results.

use serde::Serialize;

use crate::types::{AdminCredential, SessionUser};

/// Login gate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "user")]
pub enum AuthGate {
    #[default]
    LoggedOut,
    LoggedIn(SessionUser),
}

impl AuthGate {
    /// Rebuilds the gate from whatever was persisted.
    pub fn restore(stored: Option<SessionUser>) -> Self {
        match stored {
            Some(user) => AuthGate::LoggedIn(user),
            None => AuthGate::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthGate::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            AuthGate::LoggedIn(user) => Some(user),
            AuthGate::LoggedOut => None,
        }
    }
}

/// Username/password fields of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

/// Admin page state: the gate plus its login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAuth {
    gate: AuthGate,
    form: LoginForm,
}

impl AdminAuth {
    pub fn restore(stored: Option<SessionUser>) -> Self {
        AdminAuth {
            gate: AuthGate::restore(stored),
            form: LoginForm::default(),
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LoginForm {
        &mut self.form
    }

    pub fn logged_in(&mut self, user: SessionUser) {
        self.gate = AuthGate::LoggedIn(user);
    }

    /// Back to the login screen with empty fields.
    pub fn logged_out(&mut self) {
        self.gate = AuthGate::LoggedOut;
        self.form.reset();
    }
}

/// Finds the credential matching both fields exactly.
pub fn match_credentials<'a>(
    credentials: &'a [AdminCredential],
    username: &str,
    password: &str,
) -> Option<&'a AdminCredential> {
    credentials.iter().find(|c| c.matches(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn creds() -> Vec<AdminCredential> {
        vec![
            AdminCredential {
                username: "milena".to_string(),
                password: "tejido2024".to_string(),
                name: "Milena".to_string(),
            },
            AdminCredential {
                username: "ayudante".to_string(),
                password: "pincel".to_string(),
                name: "Ayudante".to_string(),
            },
        ]
    }

    #[test]
    fn test_match_credentials() {
        let list = creds();
        assert_eq!(
            match_credentials(&list, "ayudante", "pincel").map(|c| c.name.as_str()),
            Some("Ayudante")
        );
        assert!(match_credentials(&list, "milena", "pincel").is_none());
        assert!(match_credentials(&[], "milena", "tejido2024").is_none());
    }

    #[test]
    fn test_restore() {
        assert_eq!(AuthGate::restore(None), AuthGate::LoggedOut);

        let user = creds()[0].to_session_user(Utc::now());
        let gate = AuthGate::restore(Some(user.clone()));
        assert!(gate.is_logged_in());
        assert_eq!(gate.user(), Some(&user));
    }

    #[test]
    fn test_logout_resets_form() {
        let mut auth = AdminAuth::default();
        *auth.form_mut() = LoginForm::new("milena", "tejido2024");
        auth.logged_in(creds()[0].to_session_user(Utc::now()));
        assert!(auth.gate().is_logged_in());

        auth.logged_out();
        assert!(!auth.gate().is_logged_in());
        assert_eq!(auth.form(), &LoginForm::default());
    }

    #[test]
    fn test_gate_serializes_tagged() {
        let json = serde_json::to_value(AuthGate::LoggedOut).unwrap();
        assert_eq!(json["state"], "LoggedOut");
    }
}
