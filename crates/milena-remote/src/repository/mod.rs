//! # Repository Module
//!
//! Typed access to the shop's tables and image bucket.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront command                                                     │
//! │       │                                                                 │
//! │       │  backend.products().list_with_category()                        │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list_with_category()                                               │
//! │  ├── insert(&record) / update(id, &record)                              │
//! │  └── delete(id)                                                         │
//! │       │                                                                 │
//! │       │  TableQuery                                                     │
//! │       ▼                                                                 │
//! │  /rest/v1/products                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product CRUD with the joined category
//! - [`CategoryRepository`] - Category CRUD
//! - [`ImageRepository`] - Product image uploads and public URLs

pub mod category;
pub mod image;
pub mod product;

pub use category::CategoryRepository;
pub use image::ImageRepository;
pub use product::ProductRepository;

/// Table holding products.
pub const PRODUCTS_TABLE: &str = "products";

/// Table holding categories.
pub const CATEGORIES_TABLE: &str = "categories";
