//! # Domain Types
//!
//! Core inventory types shared by the catalog and the admin panel.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────┐                    │
//! │  │      Product        │        │    Category     │                    │
//! │  │  ─────────────────  │  N : 1 │  ─────────────  │                    │
//! │  │  id (i64)           │───────►│  id (i64)       │                    │
//! │  │  name               │        │  name           │                    │
//! │  │  description?       │        └─────────────────┘                    │
//! │  │  images? (0..5)     │                                               │
//! │  │  idcategory? (FK)   │        ┌─────────────────┐                    │
//! │  │  categories? (join) │        │  ProductRecord  │ ◄── write payload  │
//! │  └─────────────────────┘        └─────────────────┘                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────┐                    │
//! │  │   AdminCredential   │ match  │   SessionUser   │ ◄── persisted      │
//! │  │ username/password/  │───────►│ username, name  │                    │
//! │  │ name                │        │ logged_in_at    │                    │
//! │  └─────────────────────┘        └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Rows come straight from the hosted table API, so the serde names follow
//! the table columns: `idcategory` for the foreign key and `categories` for
//! the embedded relation.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_CATEGORY_LABEL, PLACEHOLDER_IMAGE_URL};

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Names are unique in practice, but nothing on the client enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product as read from the `products` table, with its category joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Table identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Ordered public image URLs. The first one is the main image.
    #[serde(default)]
    pub images: Option<Vec<String>>,

    /// Foreign key into `categories`.
    #[serde(default, rename = "idcategory")]
    pub category_id: Option<i64>,

    /// Joined category relation, present when the select embeds it.
    #[serde(default, rename = "categories")]
    pub category: Option<Category>,

    /// Row creation time. Lists are ordered newest first by this column.
    ///
    /// Accepts `timestamptz` values and offset-less `timestamp` values,
    /// which are read as UTC.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .ok_or_else(|| de::Error::custom(format!("invalid created_at timestamp: {}", raw)))
}

impl Product {
    /// Returns the image URLs, empty when the row has none.
    pub fn image_urls(&self) -> &[String] {
        self.images.as_deref().unwrap_or(&[])
    }

    /// Returns the main image, or the shop placeholder.
    pub fn main_image(&self) -> &str {
        self.image_urls()
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Returns the joined category name, if any.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Category name used by the catalog, falling back to "Varios".
    pub fn resolved_category(&self) -> &str {
        self.category_name().unwrap_or(DEFAULT_CATEGORY_LABEL)
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// The payload written on product insert/update.
///
/// `idcategory` is always numeric here; the form coerces its selection
/// before building the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    pub name: String,
    #[serde(rename = "idcategory")]
    pub category_id: i64,
    pub description: String,
    pub images: Vec<String>,
}

/// Payload for category create/rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

// =============================================================================
// Admin Identity
// =============================================================================

/// One entry of the static admin credential list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl AdminCredential {
    /// Exact, case-sensitive match on both fields.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// The public part of the credential, stamped with the login time.
    pub fn to_session_user(&self, logged_in_at: DateTime<Utc>) -> SessionUser {
        SessionUser {
            username: self.username.clone(),
            name: self.name.clone(),
            logged_in_at: Some(logged_in_at),
        }
    }
}

/// The logged-in admin, as persisted in local storage.
///
/// Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionUser {
    pub username: String,
    pub name: String,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Local Image
// =============================================================================

/// A file picked or dropped by the admin, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalImage {
    /// Original file name, e.g. `"jarrón azul.jpg"`.
    pub file_name: String,
    /// MIME type reported by the picker, e.g. `"image/jpeg"`.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl LocalImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        LocalImage {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// True for any `image/*` MIME type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

// Bytes are left out so logs stay readable.
impl std::fmt::Debug for LocalImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
