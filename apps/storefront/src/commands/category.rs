//! # Category Manager Commands
//!
//! The single-field category form of the dashboard: create, rename, delete.
//!
//! A blank field makes no call at all. Deleting a category still used by
//! products is rejected by the backend and reported with the generic
//! category-delete message.

use tracing::{debug, info};

use milena_core::category_editor::{CategoryAction, CategoryEditor};
use milena_core::CoreError;

use crate::commands::dashboard::{snapshot, DashboardResponse};
use crate::error::{ApiError, DELETE_CATEGORY_FAILED, SAVE_CATEGORY_FAILED};
use crate::state::{BackendState, DashboardState, SessionState};

pub fn set_category_name(
    session: &SessionState,
    dashboard: &DashboardState,
    name: String,
) -> Result<CategoryEditor, ApiError> {
    session.require_user()?;
    Ok(dashboard.with_dashboard_mut(|d| {
        d.category_editor_mut().set_name(name);
        d.category_editor().clone()
    }))
}

/// Switches the form to rename mode for a loaded category.
pub fn start_category_edit(
    session: &SessionState,
    dashboard: &DashboardState,
    category_id: i64,
) -> Result<CategoryEditor, ApiError> {
    session.require_user()?;
    dashboard.with_dashboard_mut(|d| -> Result<CategoryEditor, ApiError> {
        let category = d
            .categories()
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "category",
                id: category_id,
            })?;
        d.category_editor_mut().start_edit(&category);
        Ok(d.category_editor().clone())
    })
}

pub fn cancel_category_edit(
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<CategoryEditor, ApiError> {
    session.require_user()?;
    Ok(dashboard.with_dashboard_mut(|d| {
        d.category_editor_mut().cancel_edit();
        d.category_editor().clone()
    }))
}

/// Creates or renames, depending on the editor mode.
///
/// The name is sent exactly as typed. A name over the length limit is
/// reported without any call.
pub async fn save_category(
    backend: &BackendState,
    session: &SessionState,
    dashboard: &DashboardState,
) -> Result<DashboardResponse, ApiError> {
    session.require_user()?;

    let Some(action) = dashboard.with_dashboard(|d| d.category_editor().prepare())? else {
        debug!("Blank category name, nothing to save");
        return Ok(snapshot(dashboard));
    };
    debug!(?action, "save_category command");

    match action {
        CategoryAction::Create { name } => {
            let created = backend
                .inner()
                .create_category(&name)
                .await
                .map_err(|e| ApiError::remote(SAVE_CATEGORY_FAILED, e))?;

            info!(id = created.id, name = %created.name, "Category created");
            dashboard.with_dashboard_mut(|d| {
                let (categories, editor) = d.categories_and_editor();
                editor.apply_created(categories, created);
            });
        }
        CategoryAction::Rename { id, name } => {
            backend
                .inner()
                .rename_category(id, &name)
                .await
                .map_err(|e| ApiError::remote(SAVE_CATEGORY_FAILED, e))?;

            info!(id, name = %name, "Category renamed");
            dashboard.with_dashboard_mut(|d| {
                let (categories, editor) = d.categories_and_editor();
                editor.apply_renamed(categories, id, &name);
            });
        }
    }

    Ok(snapshot(dashboard))
}

/// Deletes a category, then drops it locally and cancels its rename if open.
pub async fn delete_category(
    backend: &BackendState,
    session: &SessionState,
    dashboard: &DashboardState,
    category_id: i64,
) -> Result<DashboardResponse, ApiError> {
    debug!(category_id, "delete_category command");
    session.require_user()?;

    backend
        .inner()
        .delete_category(category_id)
        .await
        .map_err(|e| ApiError::remote(DELETE_CATEGORY_FAILED, e))?;

    info!(category_id, "Category deleted");
    Ok(dashboard.with_dashboard_mut(|d| {
        let (categories, editor) = d.categories_and_editor();
        editor.apply_deleted(categories, category_id);
        DashboardResponse::from(&*d)
    }))
}
