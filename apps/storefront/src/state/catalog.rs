//! # Catalog State
//!
//! Holds the catalog page snapshot between commands.

use std::sync::{Arc, Mutex};

use milena_core::catalog::CatalogView;

/// Thread-safe catalog wrapper.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    view: Arc<Mutex<CatalogView>>,
}

impl CatalogState {
    pub fn new(view: CatalogView) -> Self {
        CatalogState {
            view: Arc::new(Mutex::new(view)),
        }
    }

    /// Catalog whose detail overlay falls back to `placeholder_image`.
    pub fn with_placeholder(placeholder_image: impl Into<String>) -> Self {
        Self::new(CatalogView::with_placeholder(placeholder_image))
    }

    /// Executes a function with read access to the catalog.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let visible = catalog_state.with_catalog(|c| c.visible_products().len());
    /// ```
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CatalogView) -> R,
    {
        let view = self.view.lock().expect("Catalog mutex poisoned");
        f(&view)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CatalogView) -> R,
    {
        let mut view = self.view.lock().expect("Catalog mutex poisoned");
        f(&mut view)
    }
}
