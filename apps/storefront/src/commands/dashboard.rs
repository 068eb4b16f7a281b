//! # Dashboard Commands
//!
//! Loading the admin dashboard and deleting products from its table.
//!
//! Every command here requires a logged-in admin; a closed gate answers
//! `UNAUTHORIZED` without touching the backend.

use serde::Serialize;
use tracing::{debug, info};

use milena_core::category_editor::CategoryEditor;
use milena_core::dashboard::Dashboard;
use milena_core::product_form::{FormMode, ProductForm};
use milena_core::staging::PreviewRef;
use milena_core::{Category, Product};
use milena_remote::RemoteError;

use crate::error::{ApiError, DELETE_PRODUCT_FAILED, LOAD_FAILED};
use crate::state::{BackendState, DashboardState, SessionState};

// =============================================================================
// Responses
// =============================================================================

/// One row of the product table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    /// Category name, or "Sin categoría"
    pub category_label: String,
}

/// The open product form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    /// `None` while creating
    pub product_id: Option<i64>,
    pub name: String,
    pub category_id: Option<i64>,
    pub description: String,
    pub existing_images: Vec<String>,
    pub previews: Vec<PreviewRef>,
    pub total_images: usize,
    pub busy: bool,
}

impl From<&ProductForm> for FormResponse {
    fn from(form: &ProductForm) -> Self {
        FormResponse {
            product_id: match form.mode() {
                FormMode::Create => None,
                FormMode::Edit(id) => Some(id),
            },
            name: form.name().to_string(),
            category_id: form.category_id(),
            description: form.description().to_string(),
            existing_images: form.images().existing().to_vec(),
            previews: form.images().previews().into_iter().cloned().collect(),
            total_images: form.images().total(),
            busy: form.is_busy(),
        }
    }
}

/// What the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub products: Vec<ProductRow>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub form: Option<FormResponse>,
    pub category_editor: CategoryEditor,
    pub category_manager_open: bool,
}

impl From<&Dashboard> for DashboardResponse {
    fn from(d: &Dashboard) -> Self {
        DashboardResponse {
            products: d
                .products()
                .iter()
                .map(|p| ProductRow {
                    product: p.clone(),
                    category_label: Dashboard::category_label(p).to_string(),
                })
                .collect(),
            categories: d.categories().to_vec(),
            loading: d.is_loading(),
            form: d.form().map(FormResponse::from),
            category_editor: d.category_editor().clone(),
            category_manager_open: d.is_category_manager_open(),
        }
    }
}

pub(crate) fn snapshot(dashboard: &DashboardState) -> DashboardResponse {
    dashboard.with_dashboard(|d| DashboardResponse::from(d))
}

// =============================================================================
// Commands
// =============================================================================

/// Fetches categories, then products newest first.
///
/// Any read failure empties both lists and returns the generic load message.
pub async fn load_dashboard(
    backend: &BackendState,
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    debug!("load_dashboard command");
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| d.start_loading());

    let loaded = async {
        let categories = backend.inner().list_categories().await?;
        let products = backend.inner().list_products().await?;
        Ok::<_, RemoteError>((categories, products))
    }
    .await;

    match loaded {
        Ok((categories, products)) => {
            info!(
                categories = categories.len(),
                products = products.len(),
                "Dashboard loaded"
            );
            Ok(dashboard.with_dashboard_mut(|d| {
                d.set_data(categories, products);
                DashboardResponse::from(&*d)
            }))
        }
        Err(e) => {
            dashboard.with_dashboard_mut(|d| d.load_failed());
            Err(ApiError::remote(LOAD_FAILED, e))
        }
    }
}

pub fn get_dashboard(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    session.require_user()?;
    Ok(snapshot(dashboard))
}

/// Deletes one product remotely, then drops it from the table.
pub async fn delete_product(
    backend: &BackendState,
    session: &SessionState,
    dashboard: &DashboardState,
    product_id: i64,
) -> Result<DashboardResponse, ApiError> {
    debug!(product_id, "delete_product command");
    session.require_user()?;

    backend
        .inner()
        .delete_product(product_id)
        .await
        .map_err(|e| ApiError::remote(DELETE_PRODUCT_FAILED, e))?;

    info!(product_id, "Product deleted");
    Ok(dashboard.with_dashboard_mut(|d| {
        d.remove_product(product_id);
        DashboardResponse::from(&*d)
    }))
}

pub fn open_category_manager(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| d.open_category_manager());
    Ok(snapshot(dashboard))
}

/// Closes the manager and abandons any rename in progress.
pub fn close_category_manager(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    session.require_user()?;
    Ok(dashboard.with_dashboard_mut(|d| {
        d.close_category_manager();
        DashboardResponse::from(&*d)
    }))
}
