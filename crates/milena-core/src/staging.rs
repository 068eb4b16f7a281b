//! # Image Staging
//!
//! Holds the images of the product being edited: URLs already stored in the
//! bucket, plus local files waiting to be uploaded.
//!
//! ## Staging Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ImageStaging                                     │
//! │                                                                         │
//! │   existing: ["https://.../a.jpg", ...]    staged: [(file, blob:uuid)]  │
//! │        │                                        │                       │
//! │        │ remove_existing(i)                     │ add_files / drop_files│
//! │        │                                        │ remove_staged(i)      │
//! │        │                                        │    └─► PreviewRef     │
//! │        │                                        │        released       │
//! │        └────────────────┬───────────────────────┘                       │
//! │                         │  existing + staged ≤ 5 at all times            │
//! │                         ▼                                               │
//! │   submit: upload staged one by one ──► existing ++ uploaded URLs        │
//! │   cancel/close: discard() ──► every PreviewRef released                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Object Names
//! Uploads are stored as `{unix_millis}_{sanitized name}.{extension}`, where
//! every character outside `[A-Za-z0-9]` in the original name becomes `_`
//! and the extension is whatever follows the last `.`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::LocalImage;
use crate::MAX_PRODUCT_IMAGES;

// =============================================================================
// Preview Reference
// =============================================================================

/// Handle to a local preview of a staged file (`blob:{uuid}`).
///
/// Whoever receives one back from a removal owns its release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn generate() -> Self {
        PreviewRef(format!("blob:{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A local file paired with its preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub file: LocalImage,
    pub preview: PreviewRef,
}

// =============================================================================
// Image Staging
// =============================================================================

/// Existing URLs and staged files of one edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageStaging {
    existing: Vec<String>,
    staged: Vec<StagedImage>,
}

impl ImageStaging {
    /// Starts a session with the product's stored image URLs.
    pub fn new(existing: Vec<String>) -> Self {
        ImageStaging {
            existing,
            staged: Vec::new(),
        }
    }

    pub fn existing(&self) -> &[String] {
        &self.existing
    }

    pub fn staged(&self) -> &[StagedImage] {
        &self.staged
    }

    pub fn previews(&self) -> Vec<&PreviewRef> {
        self.staged.iter().map(|s| &s.preview).collect()
    }

    /// Existing plus staged.
    pub fn total(&self) -> usize {
        self.existing.len() + self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// How many more images may still be added.
    pub fn remaining(&self) -> usize {
        MAX_PRODUCT_IMAGES.saturating_sub(self.total())
    }

    /// Stages picked files, one preview each.
    ///
    /// ## Errors
    /// `TooManyImages` when the result would exceed the ceiling. Nothing is
    /// staged in that case, not even the files that would have fit.
    pub fn add_files(&mut self, files: Vec<LocalImage>) -> CoreResult<Vec<PreviewRef>> {
        let requested = self.total() + files.len();
        if requested > MAX_PRODUCT_IMAGES {
            return Err(CoreError::TooManyImages {
                max: MAX_PRODUCT_IMAGES,
                requested,
            });
        }

        let previews: Vec<PreviewRef> = files.iter().map(|_| PreviewRef::generate()).collect();
        self.staged.extend(
            files
                .into_iter()
                .zip(previews.iter().cloned())
                .map(|(file, preview)| StagedImage { file, preview }),
        );

        Ok(previews)
    }

    /// Drag-and-drop path: keeps only `image/*` files, then behaves like
    /// [`ImageStaging::add_files`]. Dropping no images at all is a no-op.
    pub fn drop_files(&mut self, files: Vec<LocalImage>) -> CoreResult<Vec<PreviewRef>> {
        let images: Vec<LocalImage> = files.into_iter().filter(LocalImage::is_image).collect();
        if images.is_empty() {
            return Ok(Vec::new());
        }
        self.add_files(images)
    }

    /// Removes a staged file and hands back its preview for release.
    pub fn remove_staged(&mut self, index: usize) -> CoreResult<PreviewRef> {
        if index >= self.staged.len() {
            return Err(CoreError::IndexOutOfRange {
                list: "staged images",
                index,
                len: self.staged.len(),
            });
        }
        Ok(self.staged.remove(index).preview)
    }

    /// Removes an already stored image URL. The object stays in the bucket.
    pub fn remove_existing(&mut self, index: usize) -> CoreResult<String> {
        if index >= self.existing.len() {
            return Err(CoreError::IndexOutOfRange {
                list: "existing images",
                index,
                len: self.existing.len(),
            });
        }
        Ok(self.existing.remove(index))
    }

    /// Clears the staged files and returns every preview for release.
    pub fn discard(&mut self) -> Vec<PreviewRef> {
        self.staged.drain(..).map(|s| s.preview).collect()
    }

    /// Fails with `NoImages` when there is nothing to save.
    pub fn ensure_not_empty(&self) -> CoreResult<()> {
        if self.is_empty() {
            return Err(CoreError::NoImages);
        }
        Ok(())
    }
}

// =============================================================================
// Upload Helpers
// =============================================================================

/// Object name for an upload started at `now`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use milena_core::staging::object_name;
///
/// let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// assert_eq!(object_name("mi foto.jpg", now), "1700000000123_mi_foto_jpg.jpg");
/// ```
pub fn object_name(file_name: &str, now: DateTime<Utc>) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let extension = file_name.rsplit('.').next().unwrap_or(file_name);

    format!("{}_{}.{}", now.timestamp_millis(), sanitized, extension)
}

/// Final URL list: stored images first, then the fresh uploads in order.
pub fn final_image_urls(existing: &[String], uploaded: Vec<String>) -> Vec<String> {
    existing.iter().cloned().chain(uploaded).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn img(name: &str) -> LocalImage {
        LocalImage::new(name, "image/jpeg", vec![1, 2, 3])
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://cdn/{}.jpg", i)).collect()
    }

    #[test]
    fn test_add_files_creates_one_preview_each() {
        let mut staging = ImageStaging::new(urls(1));
        let previews = staging.add_files(vec![img("a.jpg"), img("b.jpg")]).unwrap();

        assert_eq!(previews.len(), 2);
        assert_ne!(previews[0], previews[1]);
        assert!(previews[0].as_str().starts_with("blob:"));
        assert_eq!(staging.total(), 3);
        assert_eq!(staging.remaining(), 2);
    }

    #[test]
    fn test_ceiling_rejects_and_leaves_state_unchanged() {
        let mut staging = ImageStaging::new(urls(2));
        staging.add_files(vec![img("a.jpg"), img("b.jpg")]).unwrap();
        let before = staging.clone();

        let err = staging.add_files(vec![img("c.jpg"), img("d.jpg")]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TooManyImages {
                max: 5,
                requested: 6
            }
        ));
        assert_eq!(staging, before);

        // Exactly at the ceiling is fine
        staging.add_files(vec![img("c.jpg")]).unwrap();
        assert_eq!(staging.total(), 5);
        assert!(staging.add_files(vec![img("e.jpg")]).is_err());
        assert_eq!(staging.total(), 5);
    }

    #[test]
    fn test_drop_filters_non_images() {
        let mut staging = ImageStaging::default();
        let dropped = vec![
            img("a.jpg"),
            LocalImage::new("notes.txt", "text/plain", vec![]),
            LocalImage::new("b.png", "image/png", vec![]),
        ];

        let previews = staging.drop_files(dropped).unwrap();
        assert_eq!(previews.len(), 2);
        assert_eq!(staging.staged()[1].file.file_name, "b.png");

        let previews = staging
            .drop_files(vec![LocalImage::new("x.pdf", "application/pdf", vec![])])
            .unwrap();
        assert!(previews.is_empty());
        assert_eq!(staging.total(), 2);
    }

    #[test]
    fn test_drop_respects_ceiling() {
        let mut staging = ImageStaging::new(urls(4));
        let err = staging.drop_files(vec![img("a.jpg"), img("b.jpg")]);
        assert!(err.is_err());
        assert_eq!(staging.total(), 4);
    }

    #[test]
    fn test_remove_staged_returns_its_preview() {
        let mut staging = ImageStaging::default();
        let previews = staging
            .add_files(vec![img("a.jpg"), img("b.jpg"), img("c.jpg")])
            .unwrap();

        let released = staging.remove_staged(1).unwrap();
        assert_eq!(released, previews[1]);
        assert_eq!(staging.previews(), vec![&previews[0], &previews[2]]);

        assert!(matches!(
            staging.remove_staged(5),
            Err(CoreError::IndexOutOfRange { index: 5, len: 2, .. })
        ));
    }

    #[test]
    fn test_remove_existing_by_position() {
        let mut staging = ImageStaging::new(urls(3));
        assert_eq!(staging.remove_existing(0).unwrap(), "https://cdn/0.jpg");
        assert_eq!(staging.existing(), &urls(3)[1..]);
        assert!(staging.remove_existing(2).is_err());
    }

    #[test]
    fn test_discard_releases_everything() {
        let mut staging = ImageStaging::new(urls(1));
        let previews = staging.add_files(vec![img("a.jpg"), img("b.jpg")]).unwrap();

        assert_eq!(staging.discard(), previews);
        assert!(staging.staged().is_empty());
        assert_eq!(staging.existing().len(), 1);
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(
            ImageStaging::default().ensure_not_empty(),
            Err(CoreError::NoImages)
        ));
        assert!(ImageStaging::new(urls(1)).ensure_not_empty().is_ok());
    }

    #[test]
    fn test_object_name_sanitizes_and_keeps_extension() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            object_name("jarrón azul.PNG", now),
            "1700000000000_jarr_n_azul_PNG.PNG"
        );
        assert_eq!(object_name("a.b.webp", now), "1700000000000_a_b_webp.webp");
        // No dot: the whole name doubles as the extension
        assert_eq!(object_name("foto", now), "1700000000000_foto.foto");
    }

    #[test]
    fn test_final_urls_keep_existing_first() {
        let existing = urls(2);
        let merged = final_image_urls(&existing, vec!["https://new/x.jpg".to_string()]);
        assert_eq!(
            merged,
            vec![
                "https://cdn/0.jpg".to_string(),
                "https://cdn/1.jpg".to_string(),
                "https://new/x.jpg".to_string()
            ]
        );
    }
}
