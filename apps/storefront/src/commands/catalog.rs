//! # Catalog Commands
//!
//! Commands behind the home page and the public catalog.
//!
//! ## Catalog Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Page                                         │
//! │                                                                         │
//! │  load_catalog ──► products newest first ──► tabs derived               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  [ buscar...            ]                                    │       │
//! │  │  ◄  Todos  Pintura  Tejido  Bordado  ►                      │       │
//! │  │     search_products   select_category   prev/next_categories │       │
//! │  │                                                              │       │
//! │  │  ┌──────┐ ┌──────┐ ┌──────┐                                 │       │
//! │  │  │ card │ │ card │ │ card │ ──── open_product ──► overlay   │       │
//! │  │  └──────┘ └──────┘ └──────┘                                 │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering never touches the backend; only `load_catalog` does.

use serde::Serialize;
use tracing::{debug, info};

use milena_core::catalog::CatalogView;
use milena_core::detail::ProductDetail;
use milena_core::route::featured;
use milena_core::Product;

use crate::error::{ApiError, LOAD_FAILED};
use crate::state::{BackendState, CatalogState, ConfigState};

/// What the catalog page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// Filtered products, in fetched order
    pub products: Vec<Product>,
    /// Tabs inside the current window
    pub categories: Vec<String>,
    pub selected_category: String,
    pub search_term: String,
    pub can_prev: bool,
    pub can_next: bool,
    pub detail_open: bool,
}

impl From<&CatalogView> for CatalogResponse {
    fn from(view: &CatalogView) -> Self {
        CatalogResponse {
            products: view.visible_products().into_iter().cloned().collect(),
            categories: view.visible_categories().to_vec(),
            selected_category: view.selected_category().to_string(),
            search_term: view.search_term().to_string(),
            can_prev: view.can_prev_categories(),
            can_next: view.can_next_categories(),
            detail_open: view.detail().is_some(),
        }
    }
}

/// What the product overlay renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    pub product: Product,
    pub images: Vec<String>,
    pub index: usize,
    pub current_image: String,
    pub has_multiple_images: bool,
    pub category: String,
    pub description: Option<String>,
    pub whatsapp_link: String,
}

impl DetailResponse {
    fn build(detail: &ProductDetail, whatsapp_number: &str) -> Self {
        DetailResponse {
            product: detail.product().clone(),
            images: detail.images().to_vec(),
            index: detail.index(),
            current_image: detail.current_image().to_string(),
            has_multiple_images: detail.has_multiple_images(),
            category: detail.category_label().to_string(),
            description: detail.description().map(str::to_string),
            whatsapp_link: detail.whatsapp_link(whatsapp_number),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Fetches every product and rebuilds the tabs.
///
/// On failure the catalog is emptied and the generic load message returned.
pub async fn load_catalog(
    backend: &BackendState,
    catalog: &CatalogState,
) -> Result<CatalogResponse, ApiError> {
    debug!("load_catalog command");

    match backend.inner().list_products().await {
        Ok(products) => {
            info!(count = products.len(), "Catalog loaded");
            Ok(catalog.with_catalog_mut(|c| {
                c.set_products(products);
                CatalogResponse::from(&*c)
            }))
        }
        Err(e) => {
            catalog.with_catalog_mut(|c| c.set_products(Vec::new()));
            Err(ApiError::remote(LOAD_FAILED, e))
        }
    }
}

/// Loads the catalog and returns the home page selection.
pub async fn load_home(
    backend: &BackendState,
    catalog: &CatalogState,
) -> Result<Vec<Product>, ApiError> {
    load_catalog(backend, catalog).await?;
    Ok(featured_products(catalog))
}

/// The newest products of the loaded catalog, for the home page.
pub fn featured_products(catalog: &CatalogState) -> Vec<Product> {
    catalog.with_catalog(|c| featured(c.products()).to_vec())
}

pub fn get_catalog(catalog: &CatalogState) -> CatalogResponse {
    catalog.with_catalog(|c| CatalogResponse::from(c))
}

// =============================================================================
// Filtering
// =============================================================================

pub fn search_products(catalog: &CatalogState, term: String) -> CatalogResponse {
    debug!(term = %term, "search_products command");
    catalog.with_catalog_mut(|c| {
        c.set_search_term(term);
        CatalogResponse::from(&*c)
    })
}

/// Sets the active tab, visible or not.
pub fn select_category(catalog: &CatalogState, category: String) -> CatalogResponse {
    debug!(category = %category, "select_category command");
    catalog.with_catalog_mut(|c| {
        c.select_category(category);
        CatalogResponse::from(&*c)
    })
}

pub fn prev_categories(catalog: &CatalogState) -> CatalogResponse {
    catalog.with_catalog_mut(|c| {
        c.prev_categories();
        CatalogResponse::from(&*c)
    })
}

pub fn next_categories(catalog: &CatalogState) -> CatalogResponse {
    catalog.with_catalog_mut(|c| {
        c.next_categories();
        CatalogResponse::from(&*c)
    })
}

// =============================================================================
// Product Overlay
// =============================================================================

pub fn open_product(
    catalog: &CatalogState,
    config: &ConfigState,
    product_id: i64,
) -> Result<DetailResponse, ApiError> {
    debug!(product_id, "open_product command");
    catalog.with_catalog_mut(|c| -> Result<DetailResponse, ApiError> {
        c.open_detail(product_id)?;
        c.detail()
            .map(|d| DetailResponse::build(d, &config.whatsapp_number))
            .ok_or_else(|| ApiError::internal("Detail overlay did not open"))
    })
}

pub fn close_product(catalog: &CatalogState) {
    catalog.with_catalog_mut(|c| c.close_detail());
}

/// The open overlay, if any.
pub fn get_product_detail(catalog: &CatalogState, config: &ConfigState) -> Option<DetailResponse> {
    catalog.with_catalog(|c| {
        c.detail()
            .map(|d| DetailResponse::build(d, &config.whatsapp_number))
    })
}

pub fn next_image(catalog: &CatalogState, config: &ConfigState) -> Option<DetailResponse> {
    update_detail(catalog, config, ProductDetail::next_image)
}

pub fn prev_image(catalog: &CatalogState, config: &ConfigState) -> Option<DetailResponse> {
    update_detail(catalog, config, ProductDetail::prev_image)
}

/// Jumps to a thumbnail; an out-of-range index is ignored.
pub fn select_image(
    catalog: &CatalogState,
    config: &ConfigState,
    index: usize,
) -> Option<DetailResponse> {
    update_detail(catalog, config, |d| d.select_image(index))
}

fn update_detail(
    catalog: &CatalogState,
    config: &ConfigState,
    f: impl FnOnce(&mut ProductDetail),
) -> Option<DetailResponse> {
    catalog.with_catalog_mut(|c| {
        let detail = c.detail_mut()?;
        f(detail);
        Some(DetailResponse::build(detail, &config.whatsapp_number))
    })
}
