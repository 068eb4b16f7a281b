//! Product image uploads.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::RemoteResult;
use crate::storage::{Bucket, UploadOptions};
use milena_core::staging::object_name;
use milena_core::LocalImage;

/// Uploads staged images to the product bucket.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    bucket: Bucket,
}

impl ImageRepository {
    pub fn new(bucket: Bucket) -> Self {
        ImageRepository { bucket }
    }

    /// Uploads `image` under a timestamped name and returns its public URL.
    pub async fn upload(&self, image: &LocalImage) -> RemoteResult<String> {
        self.upload_at(image, Utc::now()).await
    }

    /// Same as [`ImageRepository::upload`] with an explicit timestamp.
    pub async fn upload_at(&self, image: &LocalImage, now: DateTime<Utc>) -> RemoteResult<String> {
        let name = object_name(&image.file_name, now);

        if let Err(e) = self
            .bucket
            .upload(&name, image, UploadOptions::default())
            .await
        {
            warn!(file = %image.file_name, object = %name, error = %e, "Image upload failed");
            return Err(e);
        }

        let url = self.bucket.public_url(&name);
        debug!(file = %image.file_name, url = %url, "Image uploaded");
        Ok(url)
    }

    pub fn public_url(&self, object_name: &str) -> String {
        self.bucket.public_url(object_name)
    }
}
