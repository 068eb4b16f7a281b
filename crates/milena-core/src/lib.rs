//! # milena-core: Pure Storefront Logic for MilenaShop
//!
//! This crate holds every state machine of the storefront and its admin
//! panel as plain structs with explicit transitions. Nothing here talks to
//! the network or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MilenaShop Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (rendering only)                   │   │
//! │  │    Home ──► Catalogo ──► Detail overlay      Admin (unlinked)  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ projections of view models             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 milena-storefront commands                      │   │
//! │  │    load_catalog, login, save_product, delete_category, etc.    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ milena-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │  detail  │ │ staging  │ │ product_form     │  │   │
//! │  │   │ filter   │ │ carousel │ │ ≤5 imgs  │ │ category_editor  │  │   │
//! │  │   │ window   │ │ contact  │ │ previews │ │ auth, dashboard  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE TRANSITIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                milena-remote (Hosted Backend Client)            │   │
//! │  │          tables `products`/`categories`, bucket `products`      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, SessionUser, etc.)
//! - [`catalog`] - Search/category filter and the category tab window
//! - [`detail`] - Product detail overlay (image carousel, contact link)
//! - [`staging`] - Local image staging before upload
//! - [`product_form`] - Product create/edit form
//! - [`category_editor`] - Category create/rename form
//! - [`auth`] - Admin login gate
//! - [`dashboard`] - Admin dashboard snapshot
//! - [`route`] - Page routes and the home page selection
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use milena_core::catalog::CategoryWindow;
//!
//! let categories: Vec<String> = ["Todos", "Pintura", "Tejido", "Bordado", "Papelería", "Resina"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let mut window = CategoryWindow::default();
//! assert_eq!(window.visible(&categories), &categories[0..4]);
//!
//! window.next(categories.len());
//! assert_eq!(window.visible(&categories), &categories[1..5]);
//! assert!(window.can_prev());
//! assert!(window.can_next(categories.len()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod catalog;
pub mod category_editor;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod product_form;
pub mod route;
pub mod staging;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of images a single product may reference.
///
/// Counts existing URLs and staged files together.
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// Number of category tabs shown at once in the catalog.
pub const CATEGORY_WINDOW_WIDTH: usize = 4;

/// Sentinel category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "Todos";

/// Category label used by the catalog when a product has no category.
pub const DEFAULT_CATEGORY_LABEL: &str = "Varios";

/// Category label used by the admin product list when a product has no category.
pub const ADMIN_UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// Object storage bucket holding product images.
pub const PRODUCTS_BUCKET: &str = "products";

/// Cache lifetime sent with every image upload, in seconds.
pub const UPLOAD_CACHE_CONTROL_SECS: u32 = 3600;

/// Number of products featured on the home page.
pub const FEATURED_COUNT: usize = 3;

/// Image shown for products without any image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1513364776144-60967b0f800f?auto=format&fit=crop&q=80&w=400";
