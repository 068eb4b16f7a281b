//! # Catalog
//!
//! Search/category filtering and the sliding category tab strip.
//!
//! ## Catalog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog View                                   │
//! │                                                                         │
//! │  fetched products (newest first)                                        │
//! │        │                                                                │
//! │        ├──► derive_categories ──► ["Todos", "Pintura", "Tejido", ...]  │
//! │        │                                │                               │
//! │        │                                ▼                               │
//! │        │                    CategoryWindow { start, width: 4 }          │
//! │        │                    ◄ prev │ Todos Pintura Tejido Bordado │ ► │
//! │        │                                                                │
//! │        └──► filter_products(search_term, selected_category)             │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │              grid of matches (no pagination)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The window position and the selected category are independent: picking a
//! tab never moves the window, and moving the window never changes the
//! filter.

use serde::Serialize;

use crate::detail::ProductDetail;
use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::{ALL_CATEGORIES, CATEGORY_WINDOW_WIDTH, PLACEHOLDER_IMAGE_URL};

// =============================================================================
// Filtering
// =============================================================================

/// Returns the products matching a search term and a category selection.
///
/// A product matches when its name contains `search_term`
/// (case-insensitive) and either `selected_category` is `"Todos"` or the
/// product's resolved category equals it. Source order is preserved.
///
/// ## Example
/// ```rust
/// use milena_core::catalog::filter_products;
/// use milena_core::Product;
///
/// let products: Vec<Product> = serde_json::from_value(serde_json::json!([
///     { "id": 1, "name": "Bufanda Roja", "categories": { "id": 1, "name": "Tejido" } },
///     { "id": 2, "name": "Cuadro Rojo", "categories": { "id": 2, "name": "Pintura" } },
/// ])).unwrap();
///
/// let hits = filter_products(&products, "roj", "Tejido");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filter_products<'a>(
    products: &'a [Product],
    search_term: &str,
    selected_category: &str,
) -> Vec<&'a Product> {
    let needle = search_term.to_lowercase();

    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| selected_category == ALL_CATEGORIES || p.resolved_category() == selected_category)
        .collect()
}

/// Builds the tab list: `"Todos"` followed by every resolved category name
/// in first-seen order.
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for product in products {
        let name = product.resolved_category();
        if !categories.iter().any(|c| c == name) {
            categories.push(name.to_string());
        }
    }

    categories
}

// =============================================================================
// Category Window
// =============================================================================

/// A fixed-width sliding window over the category tabs.
///
/// ## Invariant
/// `0 <= start <= max(0, len - width)` for the list it is used with.
/// [`CategoryWindow::clamp`] restores it when the list shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryWindow {
    start: usize,
    width: usize,
}

impl Default for CategoryWindow {
    fn default() -> Self {
        Self::new(CATEGORY_WINDOW_WIDTH)
    }
}

impl CategoryWindow {
    /// Creates a window at position 0. A zero width is treated as 1.
    pub fn new(width: usize) -> Self {
        CategoryWindow {
            start: 0,
            width: width.max(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The tabs currently shown.
    pub fn visible<'a>(&self, categories: &'a [String]) -> &'a [String] {
        let start = self.start.min(categories.len());
        let end = (self.start + self.width).min(categories.len());
        &categories[start..end]
    }

    /// Whether the "previous" control is enabled.
    pub fn can_prev(&self) -> bool {
        self.start > 0
    }

    /// Whether the "next" control is enabled.
    pub fn can_next(&self, len: usize) -> bool {
        self.start + self.width < len
    }

    /// Shifts the window one tab left. No-op at the left edge.
    pub fn prev(&mut self) {
        self.start = self.start.saturating_sub(1);
    }

    /// Shifts the window one tab right. No-op at the right edge.
    pub fn next(&mut self, len: usize) {
        if self.can_next(len) {
            self.start += 1;
        }
    }

    /// Pulls `start` back inside `[0, max(0, len - width)]`.
    pub fn clamp(&mut self, len: usize) {
        self.start = self.start.min(len.saturating_sub(self.width));
    }
}

// =============================================================================
// Catalog View
// =============================================================================

/// Snapshot of the catalog page.
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    categories: Vec<String>,
    search_term: String,
    selected_category: String,
    window: CategoryWindow,
    detail: Option<ProductDetail>,
    placeholder_image: String,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::with_placeholder(PLACEHOLDER_IMAGE_URL)
    }
}

impl CatalogView {
    /// Empty catalog whose detail overlay falls back to `placeholder_image`.
    pub fn with_placeholder(placeholder_image: impl Into<String>) -> Self {
        CatalogView {
            products: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            search_term: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            window: CategoryWindow::default(),
            detail: None,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Replaces the product list and re-derives the tabs.
    ///
    /// Search term and selection are kept; the window is only clamped.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.categories = derive_categories(&products);
        self.products = products;
        self.window.clamp(self.categories.len());
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn window(&self) -> CategoryWindow {
        self.window
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Sets the active category filter. Does not move the window.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn prev_categories(&mut self) {
        self.window.prev();
    }

    pub fn next_categories(&mut self) {
        self.window.next(self.categories.len());
    }

    pub fn can_prev_categories(&self) -> bool {
        self.window.can_prev()
    }

    pub fn can_next_categories(&self) -> bool {
        self.window.can_next(self.categories.len())
    }

    pub fn visible_categories(&self) -> &[String] {
        self.window.visible(&self.categories)
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.search_term, &self.selected_category)
    }

    /// Opens the detail overlay for a loaded product.
    pub fn open_detail(&mut self, product_id: i64) -> CoreResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(CoreError::NotFound {
                entity: "product",
                id: product_id,
            })?;

        self.detail = Some(ProductDetail::new(product.clone(), &self.placeholder_image));
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut ProductDetail> {
        self.detail.as_mut()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
