//! # Backend State
//!
//! Wraps the remote store for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn load_catalog(
//!     backend: &BackendState,
//!     catalog: &CatalogState,
//! ) -> Result<CatalogResponse, ApiError> {
//!     let products = backend.inner().list_products().await?;
//!     ...
//! }
//! ```

use std::sync::Arc;

use milena_remote::ShopStore;

/// Shared handle to whichever `ShopStore` the app was started with.
///
/// The HTTP `Backend` keeps its own connection pool, so the handle is cloned
/// freely and never locked.
#[derive(Clone)]
pub struct BackendState {
    store: Arc<dyn ShopStore>,
}

impl BackendState {
    pub fn new(store: Arc<dyn ShopStore>) -> Self {
        BackendState { store }
    }

    pub fn inner(&self) -> &dyn ShopStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for BackendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendState").finish_non_exhaustive()
    }
}
