//! # Product Repository
//!
//! Table operations for products.
//!
//! ## Listing
//! ```text
//! GET /rest/v1/products?select=*,categories(id,name)&order=created_at.desc
//!
//! [{ "id": 7, "name": "...", "idcategory": 2, "images": [...],
//!    "categories": { "id": 2, "name": "Pintura" }, "created_at": "..." }]
//! ```
//!
//! Newest products come first; the catalog derives its tab order from this.

use tracing::debug;

use super::PRODUCTS_TABLE;
use crate::client::Backend;
use crate::error::RemoteResult;
use milena_core::{Product, ProductRecord};

/// Column list embedding the category relation.
pub const PRODUCT_WITH_CATEGORY: &str = "*, categories(id, name)";

/// Repository for product rows.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    backend: Backend,
}

impl ProductRepository {
    pub fn new(backend: Backend) -> Self {
        ProductRepository { backend }
    }

    /// Every product with its category, newest first.
    pub async fn list_with_category(&self) -> RemoteResult<Vec<Product>> {
        debug!("Listing products");
        self.backend
            .from(PRODUCTS_TABLE)
            .select(PRODUCT_WITH_CATEGORY)
            .order("created_at", false)
            .fetch()
            .await
    }

    /// Inserts one product.
    pub async fn insert(&self, record: &ProductRecord) -> RemoteResult<()> {
        debug!(name = %record.name, images = record.images.len(), "Inserting product");
        self.backend
            .from(PRODUCTS_TABLE)
            .insert(std::slice::from_ref(record))
            .await
    }

    /// Overwrites the editable fields of product `id`.
    pub async fn update(&self, id: i64, record: &ProductRecord) -> RemoteResult<()> {
        debug!(id, name = %record.name, "Updating product");
        self.backend
            .from(PRODUCTS_TABLE)
            .eq("id", id)
            .update(record)
            .await
    }

    /// Deletes product `id`. Its images stay in the bucket.
    pub async fn delete(&self, id: i64) -> RemoteResult<()> {
        debug!(id, "Deleting product");
        self.backend.from(PRODUCTS_TABLE).eq("id", id).delete().await
    }
}
