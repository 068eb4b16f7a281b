//! # Admin Dashboard
//!
//! Snapshot of the dashboard: the product and category lists, the open
//! product form and the category manager.
//!
//! The lists are only written after a remote call completes, either by a
//! full reload ([`Dashboard::set_data`]) or by a patch matching the mutation
//! that just succeeded.

use crate::category_editor::CategoryEditor;
use crate::error::{CoreError, CoreResult};
use crate::product_form::ProductForm;
use crate::staging::PreviewRef;
use crate::types::{Category, Product};
use crate::ADMIN_UNCATEGORIZED_LABEL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    products: Vec<Product>,
    categories: Vec<Category>,
    loading: bool,
    form: Option<ProductForm>,
    category_editor: CategoryEditor,
    category_manager_open: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard {
            products: Vec::new(),
            categories: Vec::new(),
            loading: true,
            form: None,
            category_editor: CategoryEditor::default(),
            category_manager_open: false,
        }
    }
}

impl Dashboard {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces both lists after a successful load.
    pub fn set_data(&mut self, categories: Vec<Category>, products: Vec<Product>) {
        self.categories = categories;
        self.products = products;
        self.loading = false;
    }

    /// Replaces only the product list (refetch after a product save).
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// A failed load leaves both lists empty.
    pub fn load_failed(&mut self) {
        self.categories.clear();
        self.products.clear();
        self.loading = false;
    }

    /// Category label for the admin list.
    pub fn category_label(product: &Product) -> &str {
        product.category_name().unwrap_or(ADMIN_UNCATEGORIZED_LABEL)
    }

    pub fn remove_product(&mut self, id: i64) {
        self.products.retain(|p| p.id != id);
    }

    // -------------------------------------------------------------------------
    // Product form
    // -------------------------------------------------------------------------

    /// Opens a blank form. Any open form is closed and its previews returned.
    ///
    /// A form with a submit in flight is never replaced.
    pub fn open_new_product(&mut self) -> CoreResult<Vec<PreviewRef>> {
        self.ensure_form_idle()?;
        let released = self.close_form();
        self.form = Some(ProductForm::open_new(&self.categories));
        Ok(released)
    }

    pub fn open_edit_product(&mut self, id: i64) -> CoreResult<Vec<PreviewRef>> {
        self.ensure_form_idle()?;
        let product = self
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound {
                entity: "product",
                id,
            })?;
        let form = ProductForm::open_edit(product);

        let released = self.close_form();
        self.form = Some(form);
        Ok(released)
    }

    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> CoreResult<&mut ProductForm> {
        self.form.as_mut().ok_or(CoreError::FormClosed)
    }

    fn ensure_form_idle(&self) -> CoreResult<()> {
        match &self.form {
            Some(form) if form.is_busy() => Err(CoreError::Busy),
            _ => Ok(()),
        }
    }

    /// Closes the form if open, returning its previews for release.
    pub fn close_form(&mut self) -> Vec<PreviewRef> {
        self.form.take().map(ProductForm::close).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Category manager
    // -------------------------------------------------------------------------

    pub fn category_editor(&self) -> &CategoryEditor {
        &self.category_editor
    }

    pub fn category_editor_mut(&mut self) -> &mut CategoryEditor {
        &mut self.category_editor
    }

    /// Splits the borrow so an editor `apply_*` can patch the list.
    pub fn categories_and_editor(&mut self) -> (&mut Vec<Category>, &mut CategoryEditor) {
        (&mut self.categories, &mut self.category_editor)
    }

    pub fn is_category_manager_open(&self) -> bool {
        self.category_manager_open
    }

    pub fn open_category_manager(&mut self) {
        self.category_manager_open = true;
    }

    pub fn close_category_manager(&mut self) {
        self.category_manager_open = false;
        self.category_editor.cancel_edit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_form::FormMode;
    use crate::types::LocalImage;

    fn data() -> (Vec<Category>, Vec<Product>) {
        let cats = vec![Category {
            id: 1,
            name: "Pintura".to_string(),
        }];
        let products = vec![
            Product {
                id: 10,
                name: "Cuadro".to_string(),
                description: None,
                images: Some(vec!["u".to_string()]),
                category_id: Some(1),
                category: Some(cats[0].clone()),
                created_at: None,
            },
            Product {
                id: 11,
                name: "Llavero".to_string(),
                description: None,
                images: None,
                category_id: None,
                category: None,
                created_at: None,
            },
        ];
        (cats, products)
    }

    #[test]
    fn test_load_lifecycle() {
        let mut dash = Dashboard::default();
        assert!(dash.is_loading());

        let (cats, products) = data();
        dash.set_data(cats, products);
        assert!(!dash.is_loading());
        assert_eq!(dash.products().len(), 2);

        dash.start_loading();
        dash.load_failed();
        assert!(dash.products().is_empty());
        assert!(dash.categories().is_empty());
        assert!(!dash.is_loading());
    }

    #[test]
    fn test_admin_category_label() {
        let (_, products) = data();
        assert_eq!(Dashboard::category_label(&products[0]), "Pintura");
        assert_eq!(Dashboard::category_label(&products[1]), "Sin categoría");
    }

    #[test]
    fn test_open_forms() {
        let mut dash = Dashboard::default();
        let (cats, products) = data();
        dash.set_data(cats, products);

        assert!(matches!(dash.form_mut(), Err(CoreError::FormClosed)));

        dash.open_new_product().unwrap();
        assert_eq!(dash.form().unwrap().category_id(), Some(1));
        let preview = dash
            .form_mut()
            .unwrap()
            .add_files(vec![LocalImage::new("a.png", "image/png", vec![])])
            .unwrap();

        // Switching to edit releases the previous form's previews
        let released = dash.open_edit_product(11).unwrap();
        assert_eq!(released, preview);
        assert_eq!(dash.form().unwrap().mode(), FormMode::Edit(11));

        assert!(dash.open_edit_product(99).is_err());
        assert!(dash.form().is_some());
    }

    #[test]
    fn test_busy_form_is_not_replaced() {
        let mut dash = Dashboard::default();
        let (cats, products) = data();
        dash.set_data(cats, products);

        dash.open_edit_product(10).unwrap();
        dash.form_mut().unwrap().begin_submit().unwrap();

        assert!(matches!(dash.open_new_product(), Err(CoreError::Busy)));
        assert!(matches!(dash.open_edit_product(11), Err(CoreError::Busy)));
        assert_eq!(dash.form().unwrap().mode(), FormMode::Edit(10));
        assert!(dash.form().unwrap().is_busy());

        // Once the submit fails, switching forms works again
        dash.form_mut().unwrap().finish_failed();
        dash.open_new_product().unwrap();
        assert_eq!(dash.form().unwrap().mode(), FormMode::Create);
    }

    #[test]
    fn test_remove_product() {
        let mut dash = Dashboard::default();
        let (cats, products) = data();
        dash.set_data(cats, products);
        dash.remove_product(10);
        assert_eq!(dash.products().len(), 1);
        assert_eq!(dash.products()[0].id, 11);
    }

    #[test]
    fn test_closing_manager_cancels_edit() {
        let mut dash = Dashboard::default();
        let (cats, products) = data();
        dash.set_data(cats.clone(), products);

        dash.open_category_manager();
        dash.category_editor_mut().start_edit(&cats[0]);
        dash.close_category_manager();
        assert!(!dash.is_category_manager_open());
        assert_eq!(dash.category_editor().editing(), None);
    }
}
