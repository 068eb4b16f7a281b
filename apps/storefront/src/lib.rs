//! # MilenaShop Storefront Library
//!
//! Application layer of the MilenaShop storefront and its admin panel.
//! Wires configuration, logging, the admin session and the remote store into
//! the state objects the commands work on.
//!
//! ## Module Organization
//! ```text
//! milena_storefront/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── config.rs       ◄─── storefront.toml + environment overrides
//! ├── session.rs      ◄─── Session storage (file / memory) and validation
//! ├── auth.rs         ◄─── AuthProvider seam, static credential list
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── backend.rs  ◄─── Remote store handle
//! │   ├── catalog.rs  ◄─── Catalog page snapshot
//! │   ├── dashboard.rs◄─── Admin dashboard snapshot
//! │   ├── session.rs  ◄─── Admin gate + its storage
//! │   └── config.rs   ◄─── Shop settings
//! ├── commands/       ◄─── Catalog, auth, dashboard, product, category
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → storefront.toml → environment → validate               │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter (RUST_LOG)                     │
//! │                                                                         │
//! │  3. Build Remote Store ───────────────────────────────────────────────► │
//! │     • Backend with apikey/bearer headers and request timeout            │
//! │                                                                         │
//! │  4. Restore Admin Session ────────────────────────────────────────────► │
//! │     • JSON session file in the platform data directory                  │
//! │                                                                         │
//! │  5. Initialize State Objects ─────────────────────────────────────────► │
//! │     • Catalog, Dashboard, Session, Config, Backend                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use milena_remote::{Backend, ShopStore};

use auth::{AuthProvider, StaticCredentials};
use config::StorefrontConfig;
use session::{
    FileSessionStorage, MemorySessionStorage, SessionStorage, SessionValidator,
    TrustStoredSession,
};
use state::{BackendState, CatalogState, ConfigState, DashboardState, SessionState};

/// Every state object of a running storefront.
#[derive(Clone)]
pub struct Storefront {
    pub backend: BackendState,
    pub catalog: CatalogState,
    pub dashboard: DashboardState,
    pub session: SessionState,
    pub config: ConfigState,
    pub auth: Arc<dyn AuthProvider>,
}

impl Storefront {
    /// Builds the HTTP backend, credential list and session file from
    /// `config`.
    pub fn bootstrap(config: &StorefrontConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let backend = Backend::new(config.backend_config())?;
        info!(url = %config.backend.url, "Backend client ready");

        let storage: Arc<dyn SessionStorage> = match config.session_file() {
            Some(path) => {
                info!(?path, "Session file");
                Arc::new(FileSessionStorage::new(path))
            }
            None => {
                info!("No data directory, session kept in memory");
                Arc::new(MemorySessionStorage::new())
            }
        };

        Ok(Self::assemble(
            Arc::new(backend),
            Arc::new(StaticCredentials::new(config.admin.users.clone())),
            storage,
            Arc::new(TrustStoredSession),
            ConfigState::from(config),
        ))
    }

    /// Wires already built collaborators together.
    pub fn assemble(
        store: Arc<dyn ShopStore>,
        auth: Arc<dyn AuthProvider>,
        storage: Arc<dyn SessionStorage>,
        validator: Arc<dyn SessionValidator>,
        config: ConfigState,
    ) -> Self {
        let session = SessionState::restore(storage, validator);
        info!(logged_in = session.is_logged_in(), "State initialized");

        Storefront {
            backend: BackendState::new(store),
            catalog: CatalogState::with_placeholder(config.placeholder_image.clone()),
            dashboard: DashboardState::new(),
            session,
            config,
            auth,
        }
    }
}

/// Loads configuration, initializes logging and builds the storefront.
///
/// `config_path` overrides the platform config file location.
pub fn start(config_path: Option<PathBuf>) -> Result<Storefront, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::load(config_path)?;
    init_tracing();

    info!(shop = %config.shop.name, "Starting MilenaShop storefront");
    Storefront::bootstrap(&config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=milena=trace` - Show trace for milena crates only
/// - Default: INFO, debug for milena crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,milena=debug,reqwest=warn"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
