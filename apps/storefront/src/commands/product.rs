//! # Product Form Commands
//!
//! Opening, editing and submitting the product form of the dashboard.
//!
//! ## Submit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    save_product                                         │
//! │                                                                         │
//! │  1. begin_submit ── no images? ──► "Debes tener al menos una imagen"    │
//! │        │             (zero remote calls)                                │
//! │        ▼  busy = true                                                   │
//! │  2. upload staged #1 ──► #2 ──► ... ──► #n   (one at a time)            │
//! │        │                                                                │
//! │        └── #k fails ──► "Error al subir la imagen {name}..."            │
//! │                         #1..#k-1 stay in the bucket, no record write    │
//! │        ▼                                                                │
//! │  3. images = existing ++ uploaded URLs                                  │
//! │  4. update (edit) / insert (create)                                     │
//! │        └── fails ──► "Error guardando producto"                         │
//! │        ▼                                                                │
//! │  5. close form (previews released) ──► refetch product list             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure clears the busy flag and leaves the form open with its
//! staged files, so the admin can retry.

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use milena_core::product_form::FormMode;
use milena_core::staging::PreviewRef;
use milena_core::{CoreError, LocalImage};

use crate::commands::dashboard::{snapshot, DashboardResponse, FormResponse};
use crate::error::{ApiError, LOAD_FAILED, SAVE_PRODUCT_FAILED};
use crate::state::{BackendState, DashboardState, SessionState};

/// Form fields as typed by the admin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    /// Raw value of the category select; empty means none
    pub category: String,
    pub description: String,
}

fn form_snapshot(dashboard: &DashboardState) -> Result<FormResponse, ApiError> {
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        Ok(FormResponse::from(&*form))
    })
}

fn release(previews: Vec<PreviewRef>) {
    if !previews.is_empty() {
        debug!(count = previews.len(), "Released image previews");
    }
}

// =============================================================================
// Opening and Closing
// =============================================================================

/// Blank form; the first known category is preselected.
pub fn open_new_product(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<FormResponse, ApiError> {
    debug!("open_new_product command");
    session.require_user()?;
    release(dashboard.with_dashboard_mut(|d| d.open_new_product())?);
    form_snapshot(dashboard)
}

/// Form prefilled from a loaded product.
pub fn open_edit_product(
    session: &SessionState,
    dashboard: &DashboardState,
    product_id: i64,
) -> Result<FormResponse, ApiError> {
    debug!(product_id, "open_edit_product command");
    session.require_user()?;
    release(dashboard.with_dashboard_mut(|d| d.open_edit_product(product_id))?);
    form_snapshot(dashboard)
}

/// Discards the form and its staged files. Refused while a submit runs.
pub fn cancel_product_form(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    debug!("cancel_product_form command");
    session.require_user()?;
    let previews = dashboard.with_dashboard_mut(|d| -> Result<Vec<PreviewRef>, ApiError> {
        if d.form().is_some_and(|f| f.is_busy()) {
            return Err(CoreError::Busy.into());
        }
        Ok(d.close_form())
    })?;
    release(previews);
    Ok(snapshot(dashboard))
}

// =============================================================================
// Editing
// =============================================================================

pub fn set_product_fields(
    session: &SessionState,
    dashboard: &DashboardState,
    fields: ProductFields,
) -> Result<FormResponse, ApiError> {
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        form.set_category_input(&fields.category)?;
        form.set_name(fields.name)?;
        form.set_description(fields.description)?;
        Ok(FormResponse::from(&*form))
    })
}

/// Stages files from the picker. Over the ceiling nothing is staged.
pub fn add_product_images(
    session: &SessionState,
    dashboard: &DashboardState,
    files: Vec<LocalImage>,
) -> Result<FormResponse, ApiError> {
    debug!(count = files.len(), "add_product_images command");
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        form.add_files(files)?;
        Ok(FormResponse::from(&*form))
    })
}

/// Stages dropped files; non-images are ignored first.
pub fn drop_product_images(
    session: &SessionState,
    dashboard: &DashboardState,
    files: Vec<LocalImage>,
) -> Result<FormResponse, ApiError> {
    debug!(count = files.len(), "drop_product_images command");
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        form.drop_files(files)?;
        Ok(FormResponse::from(&*form))
    })
}

pub fn remove_staged_image(
    session: &SessionState,
    dashboard: &DashboardState,
    index: usize,
) -> Result<FormResponse, ApiError> {
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        release(vec![form.remove_staged(index)?]);
        Ok(FormResponse::from(&*form))
    })
}

/// Drops an already stored image URL from the product. The object itself
/// stays in the bucket.
pub fn remove_existing_image(
    session: &SessionState,
    dashboard: &DashboardState,
    index: usize,
) -> Result<FormResponse, ApiError> {
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<FormResponse, ApiError> {
        let form = d.form_mut()?;
        let url = form.remove_existing(index)?;
        debug!(url = %url, "Existing image removed from form");
        Ok(FormResponse::from(&*form))
    })
}

// =============================================================================
// Submit
// =============================================================================

/// Uploads staged files, writes the product, closes the form and refetches
/// the product list.
pub async fn save_product(
    backend: &BackendState,
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    debug!("save_product command");
    session.require_user()?;

    let plan = dashboard.with_dashboard_mut(|d| d.form_mut()?.begin_submit())?;
    let store = backend.inner();

    let mut uploaded = Vec::with_capacity(plan.uploads.len());
    for image in &plan.uploads {
        match store.upload_image(image).await {
            Ok(url) => uploaded.push(url),
            Err(e) => {
                error!(
                    file = %image.file_name,
                    uploaded = uploaded.len(),
                    error = %e,
                    "Image upload failed, product not saved"
                );
                finish_failed(dashboard);
                return Err(ApiError::upload_failed(&image.file_name));
            }
        }
    }

    let record = plan.record(uploaded);
    let written = match plan.mode {
        FormMode::Create => store.insert_product(&record).await,
        FormMode::Edit(id) => store.update_product(id, &record).await,
    };
    if let Err(e) = written {
        finish_failed(dashboard);
        return Err(ApiError::remote(SAVE_PRODUCT_FAILED, e));
    }

    info!(name = %record.name, images = record.images.len(), mode = ?plan.mode, "Product saved");
    release(dashboard.with_dashboard_mut(|d| d.close_form()));

    let products = store
        .list_products()
        .await
        .map_err(|e| ApiError::remote(LOAD_FAILED, e))?;

    Ok(dashboard.with_dashboard_mut(|d| {
        d.set_products(products);
        DashboardResponse::from(&*d)
    }))
}

fn finish_failed(dashboard: &DashboardState) {
    dashboard.with_dashboard_mut(|d| match d.form_mut() {
        Ok(form) => form.finish_failed(),
        Err(_) => warn!("Product form closed during submit"),
    });
}
