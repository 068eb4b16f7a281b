//! # milena-remote: Hosted Backend Client for MilenaShop
//!
//! Every call the storefront makes to its hosted backend goes through this
//! crate: the REST table API for `products`/`categories` and the object
//! storage bucket for product images.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MilenaShop Data Flow                             │
//! │                                                                         │
//! │  Storefront command (save_product)                                     │
//! │       │                                                                 │
//! │       ▼  dyn ShopStore                                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   milena-remote (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Backend     │    │  Repositories │    │  TableQuery  │  │   │
//! │  │   │  (client.rs)  │    │ ProductRepo   │───►│  Bucket      │  │   │
//! │  │   │ reqwest pool  │◄───│ CategoryRepo  │    │  (HTTP)      │  │   │
//! │  │   │ auth headers  │    │ ImageRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   Hosted backend: /rest/v1/{table}   /storage/v1/object/...      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Backend URL, key, timeout, bucket
//! - [`client`] - The shared HTTP handle
//! - [`query`] - Generic table select/insert/update/delete
//! - [`storage`] - Bucket upload and public URLs
//! - [`repository`] - Typed repositories
//! - [`store`] - The `ShopStore` trait used by the app layer
//! - [`error`] - Remote error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use milena_remote::{Backend, BackendConfig};
//!
//! let backend = Backend::new(BackendConfig::new(url, anon_key))?;
//! let products = backend.products().list_with_category().await?;
//! ```
//!
//! No call is ever retried; a failure is returned to the caller as is.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod repository;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::Backend;
pub use config::BackendConfig;
pub use error::{RemoteError, RemoteResult};
pub use store::ShopStore;

// Repository re-exports for convenience
pub use repository::{CategoryRepository, ImageRepository, ProductRepository};
