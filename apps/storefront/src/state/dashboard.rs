//! # Dashboard State
//!
//! Holds the admin dashboard snapshot, including the open product form.
//!
//! ## Locking Around Remote Calls
//! ```text
//! save_product
//!   │
//!   ├─ with_dashboard_mut(begin_submit)   lock ─ release
//!   ├─ upload #1 .. #n                    (no lock held)
//!   ├─ insert / update                    (no lock held)
//!   └─ with_dashboard_mut(close_form)     lock ─ release
//! ```
//! The form's busy flag, not the mutex, keeps a second submit out while the
//! first one awaits.

use std::sync::{Arc, Mutex};

use milena_core::dashboard::Dashboard;

/// Thread-safe dashboard wrapper.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    dashboard: Arc<Mutex<Dashboard>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the dashboard.
    pub fn with_dashboard<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Dashboard) -> R,
    {
        let dashboard = self.dashboard.lock().expect("Dashboard mutex poisoned");
        f(&dashboard)
    }

    /// Executes a function with write access to the dashboard.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let plan = dashboard_state.with_dashboard_mut(|d| d.form_mut()?.begin_submit())?;
    /// ```
    pub fn with_dashboard_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Dashboard) -> R,
    {
        let mut dashboard = self.dashboard.lock().expect("Dashboard mutex poisoned");
        f(&mut dashboard)
    }
}
