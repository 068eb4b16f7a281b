//! # Product Form
//!
//! Create/edit form of the admin dashboard.
//!
//! ## Submit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Submit                                   │
//! │                                                                         │
//! │  begin_submit()                                                         │
//! │   ├── busy?             → Err(Busy)          (no calls)                 │
//! │   ├── no images?        → Err(NoImages)      (no calls)                 │
//! │   ├── blank name?       → Err(Validation)    (no calls)                 │
//! │   ├── no category?      → Err(Validation)    (no calls)                 │
//! │   └── Ok(SubmitPlan)    busy = true                                     │
//! │            │                                                            │
//! │            ▼  (caller, outside any lock)                                │
//! │   upload plan.uploads one at a time ──✗──► finish_failed(), abort       │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   plan.record(uploaded_urls) ──► insert (Create) / update (Edit id)     │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   close form, refetch product list                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uploads that succeeded before a failure are not removed from the bucket.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::staging::{final_image_urls, ImageStaging, PreviewRef};
use crate::types::{Category, LocalImage, Product, ProductRecord};
use crate::validation::{parse_category_id, validate_product_name};

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// State of the open product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    name: String,
    category_id: Option<i64>,
    description: String,
    images: ImageStaging,
    busy: bool,
}

impl ProductForm {
    /// Blank form with the first known category preselected.
    pub fn open_new(categories: &[Category]) -> Self {
        ProductForm {
            mode: FormMode::Create,
            name: String::new(),
            category_id: categories.first().map(|c| c.id),
            description: String::new(),
            images: ImageStaging::default(),
            busy: false,
        }
    }

    /// Form prefilled from a stored product.
    pub fn open_edit(product: &Product) -> Self {
        ProductForm {
            mode: FormMode::Edit(product.id),
            name: product.name.clone(),
            category_id: product.category_id,
            description: product.description.clone().unwrap_or_default(),
            images: ImageStaging::new(product.image_urls().to_vec()),
            busy: false,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn images(&self) -> &ImageStaging {
        &self.images
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // -------------------------------------------------------------------------
    // Field edits
    // -------------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        self.ensure_idle()?;
        self.name = name.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> CoreResult<()> {
        self.ensure_idle()?;
        self.description = description.into();
        Ok(())
    }

    pub fn set_category(&mut self, category_id: Option<i64>) -> CoreResult<()> {
        self.ensure_idle()?;
        self.category_id = category_id;
        Ok(())
    }

    /// Sets the category from the raw `<select>` value.
    pub fn set_category_input(&mut self, input: &str) -> CoreResult<()> {
        self.ensure_idle()?;
        self.category_id = parse_category_id(input)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Images
    // -------------------------------------------------------------------------

    pub fn add_files(&mut self, files: Vec<LocalImage>) -> CoreResult<Vec<PreviewRef>> {
        self.ensure_idle()?;
        self.images.add_files(files)
    }

    pub fn drop_files(&mut self, files: Vec<LocalImage>) -> CoreResult<Vec<PreviewRef>> {
        self.ensure_idle()?;
        self.images.drop_files(files)
    }

    pub fn remove_staged(&mut self, index: usize) -> CoreResult<PreviewRef> {
        self.ensure_idle()?;
        self.images.remove_staged(index)
    }

    pub fn remove_existing(&mut self, index: usize) -> CoreResult<String> {
        self.ensure_idle()?;
        self.images.remove_existing(index)
    }

    /// The form is frozen from `begin_submit` until the submit ends.
    fn ensure_idle(&self) -> CoreResult<()> {
        if self.busy {
            return Err(CoreError::Busy);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// Checks the form and marks it busy.
    ///
    /// Every error here is raised before any remote call and leaves the form
    /// as it was.
    pub fn begin_submit(&mut self) -> CoreResult<SubmitPlan> {
        self.ensure_idle()?;
        self.images.ensure_not_empty()?;
        validate_product_name(&self.name)?;
        let category_id = self
            .category_id
            .ok_or_else(|| ValidationError::required("category"))?;

        self.busy = true;

        Ok(SubmitPlan {
            mode: self.mode,
            name: self.name.clone(),
            category_id,
            description: self.description.clone(),
            existing: self.images.existing().to_vec(),
            uploads: self.images.staged().iter().map(|s| s.file.clone()).collect(),
        })
    }

    /// Clears the busy flag after a failed submit. The form stays open with
    /// its staged files so the admin can retry.
    pub fn finish_failed(&mut self) {
        self.busy = false;
    }

    /// Closes the form, returning every preview for release.
    pub fn close(mut self) -> Vec<PreviewRef> {
        self.images.discard()
    }
}

// =============================================================================
// Submit Plan
// =============================================================================

/// Everything the submit needs, detached from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    pub mode: FormMode,
    pub name: String,
    pub category_id: i64,
    pub description: String,
    pub existing: Vec<String>,
    pub uploads: Vec<LocalImage>,
}

impl SubmitPlan {
    /// Builds the record to write once every upload succeeded.
    pub fn record(&self, uploaded_urls: Vec<String>) -> ProductRecord {
        ProductRecord {
            name: self.name.clone(),
            category_id: self.category_id,
            description: self.description.clone(),
            images: final_image_urls(&self.existing, uploaded_urls),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
