//! # Backend Configuration
//!
//! Where the hosted backend lives and how to talk to it.
//!
//! ```text
//! BackendConfig::new("https://xyz.supabase.co", anon_key)
//!     .timeout(Duration::from_secs(10))
//!     .bucket("products")
//!        │
//!        ├── rest_url()     → https://xyz.supabase.co/rest/v1
//!        └── storage_url()  → https://xyz.supabase.co/storage/v1
//! ```

use std::time::Duration;

use url::Url;

use crate::error::{RemoteError, RemoteResult};
use milena_core::PRODUCTS_BUCKET;

/// Hosted backend configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use milena_remote::BackendConfig;
///
/// let config = BackendConfig::new("https://shop.supabase.co/", "anon-key")
///     .timeout(Duration::from_secs(10));
///
/// assert_eq!(config.rest_url(), "https://shop.supabase.co/rest/v1");
/// ```
#[derive(Clone)]
pub struct BackendConfig {
    /// Project URL, without trailing slash.
    pub url: String,

    /// Public anon key, sent as `apikey` and as bearer token.
    pub anon_key: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Storage bucket for product images.
    /// Default: `products`
    pub bucket: String,
}

impl BackendConfig {
    /// Creates a configuration with default timeout and bucket.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        BackendConfig {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(30),
            bucket: PRODUCTS_BUCKET.to_string(),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the image bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }

    /// Checks the URL parses as http(s) and the key is present.
    pub fn validate(&self) -> RemoteResult<()> {
        let parsed = Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidConfig(format!(
                "backend url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.anon_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("anon key is empty".to_string()));
        }

        if self.bucket.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("bucket is empty".to_string()));
        }

        Ok(())
    }
}

// The key stays out of logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("bucket", &self.bucket)
            .finish()
    }
}
