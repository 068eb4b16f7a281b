//! # Shop Store
//!
//! The seam between the storefront commands and the hosted backend.
//!
//! ```text
//!  commands ──► dyn ShopStore ──┬──► Backend (HTTP)
//!                               └──► in-memory fake (tests)
//! ```
//!
//! One method per remote operation the storefront performs. Every method is
//! a single request; ordering between them is the caller's business.

use async_trait::async_trait;

use crate::client::Backend;
use crate::error::RemoteResult;
use milena_core::{Category, LocalImage, Product, ProductRecord};

#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Every category.
    async fn list_categories(&self) -> RemoteResult<Vec<Category>>;

    /// Every product with its category, newest first.
    async fn list_products(&self) -> RemoteResult<Vec<Product>>;

    async fn insert_product(&self, record: &ProductRecord) -> RemoteResult<()>;

    async fn update_product(&self, id: i64, record: &ProductRecord) -> RemoteResult<()>;

    async fn delete_product(&self, id: i64) -> RemoteResult<()>;

    /// Inserts a category and returns the stored row.
    async fn create_category(&self, name: &str) -> RemoteResult<Category>;

    async fn rename_category(&self, id: i64, name: &str) -> RemoteResult<()>;

    async fn delete_category(&self, id: i64) -> RemoteResult<()>;

    /// Uploads one image and returns its public URL.
    async fn upload_image(&self, image: &LocalImage) -> RemoteResult<String>;
}

#[async_trait]
impl ShopStore for Backend {
    async fn list_categories(&self) -> RemoteResult<Vec<Category>> {
        self.categories().list().await
    }

    async fn list_products(&self) -> RemoteResult<Vec<Product>> {
        self.products().list_with_category().await
    }

    async fn insert_product(&self, record: &ProductRecord) -> RemoteResult<()> {
        self.products().insert(record).await
    }

    async fn update_product(&self, id: i64, record: &ProductRecord) -> RemoteResult<()> {
        self.products().update(id, record).await
    }

    async fn delete_product(&self, id: i64) -> RemoteResult<()> {
        self.products().delete(id).await
    }

    async fn create_category(&self, name: &str) -> RemoteResult<Category> {
        self.categories().create(name).await
    }

    async fn rename_category(&self, id: i64, name: &str) -> RemoteResult<()> {
        self.categories().rename(id, name).await
    }

    async fn delete_category(&self, id: i64) -> RemoteResult<()> {
        self.categories().delete(id).await
    }

    async fn upload_image(&self, image: &LocalImage) -> RemoteResult<String> {
        self.images().upload(image).await
    }
}
