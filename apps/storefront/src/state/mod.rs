//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each page
//! and each collaborator gets its own state type. Commands declare exactly
//! the state they touch, and the catalog never contends with the dashboard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ CatalogState │ │DashboardState│ │ SessionState │ │ BackendState │  │
//! │  │              │ │              │ │              │ │              │  │
//! │  │  Arc<Mutex<  │ │  Arc<Mutex<  │ │  Arc<Mutex<  │ │  Arc<dyn     │  │
//! │  │  CatalogView │ │  Dashboard   │ │  AdminAuth   │ │  ShopStore>  │  │
//! │  │  >>          │ │  >>          │ │  >> + store  │ │              │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  ┌──────────────┐                                                      │
//! │  │ ConfigState  │  shop name, WhatsApp number, placeholder image       │
//! │  └──────────────┘                                                      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Snapshots are guarded by Arc<Mutex<T>> and reached via closures     │
//! │  • A closure never awaits, so no lock is held across a remote call     │
//! │  • BackendState and ConfigState are read-only after startup            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod catalog;
mod config;
mod dashboard;
mod session;

pub use backend::BackendState;
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use dashboard::DashboardState;
pub use session::SessionState;
