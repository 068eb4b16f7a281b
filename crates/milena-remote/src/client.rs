//! # Backend Client
//!
//! The handle every remote call goes through.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Handle                                  │
//! │                                                                         │
//! │  BackendConfig::new(url, key)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← validates, builds one reqwest::Client           │
//! │       │                  default headers: apikey, Authorization         │
//! │       ▼                                                                 │
//! │  ┌────────────────────┬────────────────────┬──────────────────────┐    │
//! │  │ products()         │ categories()       │ images()             │    │
//! │  │ ProductRepository  │ CategoryRepository │ ImageRepository      │    │
//! │  └─────────┬──────────┴─────────┬──────────┴──────────┬───────────┘    │
//! │            ▼                    ▼                     ▼                 │
//! │     from("products")    from("categories")     storage(bucket)         │
//! │        TableQuery           TableQuery              Bucket             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cloning a `Backend` is cheap: the inner client is reference counted and
//! shares one connection pool.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::BackendConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::query::TableQuery;
use crate::repository::category::CategoryRepository;
use crate::repository::image::ImageRepository;
use crate::repository::product::ProductRepository;
use crate::storage::Bucket;

/// Main backend handle providing repository access.
#[derive(Debug, Clone)]
pub struct Backend {
    http: Client,
    config: BackendConfig,
}

impl Backend {
    /// Builds the HTTP client for a validated configuration.
    pub fn new(config: BackendConfig) -> RemoteResult<Self> {
        config.validate()?;

        info!(url = %config.url, bucket = %config.bucket, "Initializing backend client");

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| RemoteError::InvalidConfig(format!("anon key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| RemoteError::InvalidConfig(format!("anon key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Backend { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Starts a query against `table`.
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery::new(self.http.clone(), self.config.rest_url(), table)
    }

    /// Handle to a storage bucket.
    pub fn storage(&self, bucket: &str) -> Bucket {
        Bucket::new(self.http.clone(), self.config.storage_url(), bucket)
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    /// Image repository on the configured bucket.
    pub fn images(&self) -> ImageRepository {
        ImageRepository::new(self.storage(&self.config.bucket))
    }

    /// Checks the table API answers.
    ///
    /// ## Returns
    /// * `true` - reading category ids succeeded
    /// * `false` - the backend is unreachable or rejected the key
    pub async fn health_check(&self) -> bool {
        match self.from("categories").select("id").fetch::<serde_json::Value>().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Backend::new(BackendConfig::new("nope", "k")).is_err());
        assert!(matches!(
            Backend::new(BackendConfig::new("https://a.supabase.co", "bad\nkey")),
            Err(RemoteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_query_and_bucket_urls() {
        let backend = Backend::new(BackendConfig::new("https://a.supabase.co/", "k")).unwrap();
        let url = backend.from("products").url().unwrap();
        assert_eq!(url.as_str(), "https://a.supabase.co/rest/v1/products");

        assert_eq!(
            backend.images().public_url("x.jpg"),
            "https://a.supabase.co/storage/v1/object/public/products/x.jpg"
        );
    }
}
