//! # Commands Module
//!
//! Every operation the storefront pages invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── Catalog load, search, tabs, product overlay
//! ├── auth.rs       ◄─── Admin login / logout
//! ├── dashboard.rs  ◄─── Dashboard load, product delete
//! ├── product.rs    ◄─── Product form, image staging, submit
//! ├── category.rs   ◄─── Category create / rename / delete
//! └── config.rs     ◄─── Shop settings, routes
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Page event (click "Guardar")                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn save_product(                                                 │
//! │      backend: &BackendState,     ◄── remote store                      │
//! │      session: &SessionState,     ◄── admin gate                        │
//! │      dashboard: &DashboardState, ◄── page snapshot                     │
//! │  ) -> Result<DashboardResponse, ApiError>                               │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Page re-renders from the response                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only the catalog snapshot
//! fn search_products(catalog: &CatalogState, term: String)
//!
//! // Remote store plus snapshot
//! async fn load_catalog(backend: &BackendState, catalog: &CatalogState)
//!
//! // Admin commands also check the session
//! async fn delete_product(backend, session, dashboard, product_id)
//! ```

pub mod auth;
pub mod catalog;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod product;
