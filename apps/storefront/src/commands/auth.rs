//! # Admin Auth Commands
//!
//! Login, logout and the gate check behind the unlinked `/admin` route.
//!
//! ```text
//!   LoggedOut ── login(ok) ──► LoggedIn ── logout ──► LoggedOut
//!       │  ▲                                              (fields reset)
//!       └──┘ login(mismatch): "Credenciales incorrectas"
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use milena_core::auth::AuthGate;
use milena_core::SessionUser;

use crate::auth::AuthProvider;
use crate::error::ApiError;
use crate::state::SessionState;

/// What the admin page renders before deciding login vs dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub gate: AuthGate,
    pub username: String,
}

fn snapshot(session: &SessionState) -> AuthResponse {
    session.with_auth(|auth| AuthResponse {
        gate: auth.gate().clone(),
        username: auth.form().username.clone(),
    })
}

/// Current gate, as restored at startup or changed since.
pub fn get_auth(session: &SessionState) -> AuthResponse {
    snapshot(session)
}

/// Checks the pair with `provider` and persists the matched admin.
///
/// On a mismatch the typed fields are kept and the gate stays closed.
pub async fn login(
    session: &SessionState,
    provider: &dyn AuthProvider,
    username: String,
    password: String,
) -> Result<SessionUser, ApiError> {
    debug!(username = %username, "login command");

    session.with_auth_mut(|auth| {
        let form = auth.form_mut();
        form.username = username.clone();
        form.password = password.clone();
    });

    let user = match provider.authenticate(&username, &password).await {
        Ok(user) => user,
        Err(e) => {
            warn!(username = %username, "Login rejected");
            return Err(e.into());
        }
    };

    session.start(user.clone())?;
    info!(username = %user.username, "Admin logged in");

    Ok(user)
}

/// Clears the stored session and resets the login fields.
pub fn logout(session: &SessionState) -> Result<AuthResponse, ApiError> {
    debug!("logout command");
    session.end()?;
    info!("Admin logged out");
    Ok(snapshot(session))
}
