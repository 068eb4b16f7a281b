//! # Storefront Configuration
//!
//! Configuration management for the storefront app.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SUPABASE_URL=https://xyz.supabase.co                               │
//! │     SUPABASE_ANON_KEY=eyJ...                                           │
//! │     MILENA_WHATSAPP_NUMBER=584120183859                                │
//! │     MILENA_SESSION_PATH=/tmp/admin-session.json                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/milenashop/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.milenashop.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [backend]
//! url = "https://xyz.supabase.co"
//! anon_key = "eyJ..."
//! timeout_secs = 30
//!
//! [shop]
//! name = "MilenaShop"
//! whatsapp_number = "584120183859"
//!
//! [[admin.users]]
//! username = "milena"
//! password = "..."
//! name = "Milena"
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use milena_core::validation::validate_whatsapp_number;
use milena_core::{AdminCredential, PLACEHOLDER_IMAGE_URL};
use milena_remote::BackendConfig;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Name of the session file inside the platform data directory.
pub const SESSION_FILE_NAME: &str = "admin-session.json";

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Backend Section
// =============================================================================

/// Hosted backend connection settings.
#[derive(Clone, Deserialize)]
pub struct BackendSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anon key.
    #[serde(default)]
    pub anon_key: String,

    /// HTTP request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

// The anon key stays out of logs.
impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// Shop Section
// =============================================================================

/// Storefront display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopSettings {
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Number used for the WhatsApp contact link (digits only).
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Image shown for products without images.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_shop_name() -> String {
    "MilenaShop".to_string()
}

fn default_whatsapp_number() -> String {
    "584120183859".to_string()
}

fn default_placeholder_image() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            name: default_shop_name(),
            whatsapp_number: default_whatsapp_number(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

// =============================================================================
// Admin Section
// =============================================================================

/// Static admin credential list.
#[derive(Clone, Default, Deserialize)]
pub struct AdminSettings {
    #[serde(default)]
    pub users: Vec<AdminCredential>,
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let usernames: Vec<&str> = self.users.iter().map(|u| u.username.as_str()).collect();
        f.debug_struct("AdminSettings")
            .field("users", &usernames)
            .finish()
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub shop: ShopSettings,

    #[serde(default)]
    pub admin: AdminSettings,

    /// Where the admin session is persisted. Defaults to the platform data dir.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Loads configuration from all sources.
    ///
    /// Defaults, then the TOML file (explicit path or the platform default),
    /// then environment overrides, then validation.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// An empty backend URL is allowed here; it only fails once a backend
    /// client is built from it.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.backend.url;
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Backend URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        validate_whatsapp_number(&self.shop.whatsapp_number)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(user) = self.admin.users.iter().find(|u| u.username.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "Admin user '{}' has an empty username",
                user.name
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SUPABASE_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.url = url;
        }

        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            self.backend.anon_key = key;
        }

        if let Some(number) = lookup("MILENA_WHATSAPP_NUMBER") {
            debug!(number = %number, "Overriding WhatsApp number from environment");
            self.shop.whatsapp_number = number;
        }

        if let Some(path) = lookup("MILENA_SESSION_PATH") {
            self.session_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "milenashop", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Session file location: the configured path or the platform data dir.
    pub fn session_file(&self) -> Option<PathBuf> {
        self.session_path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "milenashop", "storefront")
                .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
        })
    }

    /// Builds the remote client config from the `[backend]` section.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(&self.backend.url, &self.backend.anon_key)
            .timeout(Duration::from_secs(self.backend.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.shop.whatsapp_number, "584120183859");
        assert_eq!(config.shop.placeholder_image, PLACEHOLDER_IMAGE_URL);
        assert!(config.admin.users.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [backend]
            url = "https://xyz.supabase.co"
            anon_key = "anon"

            [shop]
            name = "Milena"

            [[admin.users]]
            username = "milena"
            password = "secreto"
            name = "Milena"
        "#;

        let config: StorefrontConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.url, "https://xyz.supabase.co");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.shop.name, "Milena");
        assert_eq!(config.shop.whatsapp_number, "584120183859");
        assert_eq!(config.admin.users.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SUPABASE_URL", "https://override.supabase.co"),
            ("MILENA_WHATSAPP_NUMBER", "5491112345678"),
            ("MILENA_SESSION_PATH", "/tmp/session.json"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.url, "https://override.supabase.co");
        assert_eq!(config.backend.anon_key, "");
        assert_eq!(config.shop.whatsapp_number, "5491112345678");
        assert_eq!(config.session_file(), Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = StorefrontConfig::default();
        config.backend.url = "ftp://xyz".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_phone() {
        let mut config = StorefrontConfig::default();
        config.shop.whatsapp_number = "+58 412".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[backend]
url = "https://xyz.supabase.co"
timeout_secs = 10

[[admin.users]]
username = "milena"
password = "secreto"
name = "Milena"
"#,
        )
        .unwrap();

        let config = StorefrontConfig::load(Some(path)).unwrap();
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.shop.name, "MilenaShop");
        assert_eq!(config.admin.users[0].username, "milena");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[backend\nurl = ").unwrap();

        assert!(matches!(
            StorefrontConfig::load(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_backend_config_from_section() {
        let mut config = StorefrontConfig::default();
        config.backend.url = "https://xyz.supabase.co".to_string();
        config.backend.timeout_secs = 5;
        assert_eq!(
            config.backend_config().rest_url(),
            "https://xyz.supabase.co/rest/v1"
        );
    }
}
