//! Table operations for categories.

use tracing::debug;

use super::CATEGORIES_TABLE;
use crate::client::Backend;
use crate::error::{RemoteError, RemoteResult};
use milena_core::{Category, CategoryName};

/// Repository for category rows.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    backend: Backend,
}

impl CategoryRepository {
    pub fn new(backend: Backend) -> Self {
        CategoryRepository { backend }
    }

    /// Every category, in the order the backend returns them.
    pub async fn list(&self) -> RemoteResult<Vec<Category>> {
        self.backend.from(CATEGORIES_TABLE).select("*").fetch().await
    }

    /// Inserts a category and returns the stored row.
    pub async fn create(&self, name: &str) -> RemoteResult<Category> {
        debug!(name = %name, "Creating category");

        let rows = [CategoryName {
            name: name.to_string(),
        }];
        let created: Vec<Category> = self
            .backend
            .from(CATEGORIES_TABLE)
            .insert_returning(&rows[..])
            .await?;

        created
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::EmptyResponse {
                table: CATEGORIES_TABLE.to_string(),
            })
    }

    pub async fn rename(&self, id: i64, name: &str) -> RemoteResult<()> {
        debug!(id, name = %name, "Renaming category");
        self.backend
            .from(CATEGORIES_TABLE)
            .eq("id", id)
            .update(&CategoryName {
                name: name.to_string(),
            })
            .await
    }

    /// Deletes category `id`.
    ///
    /// Whether products still pointing at it block the delete depends on the
    /// backend's foreign key; no check is made here.
    pub async fn delete(&self, id: i64) -> RemoteResult<()> {
        debug!(id, "Deleting category");
        self.backend.from(CATEGORIES_TABLE).eq("id", id).delete().await
    }
}
