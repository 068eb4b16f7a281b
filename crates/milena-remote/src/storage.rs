//! # Object Storage
//!
//! Uploads to a storage bucket and builds public URLs.
//!
//! ```text
//! upload("1700000000000_foto_jpg.jpg", image, options)
//!     POST {base}/storage/v1/object/{bucket}/{object}
//!          x-upsert: false
//!          multipart: cacheControl=3600, file=<bytes>
//!
//! public_url("1700000000000_foto_jpg.jpg")
//!     {base}/storage/v1/object/public/{bucket}/{object}
//! ```

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::error::RemoteResult;
use crate::query::checked_body;
use milena_core::{LocalImage, UPLOAD_CACHE_CONTROL_SECS};

/// Options sent with an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub cache_control_secs: u32,
    pub upsert: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        UploadOptions {
            cache_control_secs: UPLOAD_CACHE_CONTROL_SECS,
            upsert: false,
        }
    }
}

/// A storage bucket.
#[derive(Debug, Clone)]
pub struct Bucket {
    http: Client,
    storage_url: String,
    name: String,
}

impl Bucket {
    pub(crate) fn new(http: Client, storage_url: String, name: impl Into<String>) -> Self {
        Bucket {
            http,
            storage_url,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uploads one file under `object_name`.
    ///
    /// With `upsert: false` an existing object of the same name makes the
    /// upload fail instead of replacing it.
    pub async fn upload(
        &self,
        object_name: &str,
        image: &LocalImage,
        options: UploadOptions,
    ) -> RemoteResult<()> {
        let url = format!("{}/object/{}/{}", self.storage_url, self.name, object_name);
        debug!(
            bucket = %self.name,
            object = %object_name,
            size = image.bytes.len(),
            "Uploading object"
        );

        let part = Part::bytes(image.bytes.clone())
            .file_name(object_name.to_string())
            .mime_str(&image.content_type)?;
        let form = Form::new()
            .text("cacheControl", options.cache_control_secs.to_string())
            .part("file", part);

        let response = self
            .http
            .post(url)
            .header("x-upsert", options.upsert.to_string())
            .multipart(form)
            .send()
            .await?;
        checked_body(response).await?;

        Ok(())
    }

    /// Public URL of an object. Does not check that it exists.
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url, self.name, object_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let bucket = Bucket::new(
            Client::new(),
            "https://shop.supabase.co/storage/v1".to_string(),
            "products",
        );
        assert_eq!(
            bucket.public_url("1_a_jpg.jpg"),
            "https://shop.supabase.co/storage/v1/object/public/products/1_a_jpg.jpg"
        );
    }

    #[test]
    fn test_default_options() {
        let options = UploadOptions::default();
        assert_eq!(options.cache_control_secs, 3600);
        assert!(!options.upsert);
    }
}
