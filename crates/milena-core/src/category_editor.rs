//! # Category Editor
//!
//! The single-field form of the category manager. It toggles between
//! "create" and "rename" depending on whether a category id is remembered.
//!
//! ```text
//!            start_edit(cat)
//!   Create ──────────────────► Rename(id)
//!     ▲  ◄──── cancel_edit / applied / deleted(id) ──┘
//! ```
//!
//! Remote calls happen in the app layer; the `apply_*` methods patch the
//! local list only after the call succeeded.

use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::types::Category;
use crate::validation::validate_category_name;

/// What a submit of the editor should do remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryAction {
    Create { name: String },
    Rename { id: i64, name: String },
}

/// State of the category form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryEditor {
    name: String,
    editing: Option<i64>,
}

impl CategoryEditor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the category being renamed, if any.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Switches to rename mode for `category`.
    pub fn start_edit(&mut self, category: &Category) {
        self.name = category.name.clone();
        self.editing = Some(category.id);
    }

    /// Back to create mode with an empty field.
    pub fn cancel_edit(&mut self) {
        self.name.clear();
        self.editing = None;
    }

    /// The action a submit should perform, or `None` for a blank name.
    ///
    /// The name is sent as typed; only the blank check trims. Any other
    /// validation failure is returned to the caller.
    pub fn prepare(&self) -> CoreResult<Option<CategoryAction>> {
        match validate_category_name(&self.name) {
            Ok(()) => {}
            Err(ValidationError::Required { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        Ok(Some(match self.editing {
            Some(id) => CategoryAction::Rename {
                id,
                name: self.name.clone(),
            },
            None => CategoryAction::Create {
                name: self.name.clone(),
            },
        }))
    }

    /// Appends the row returned by the insert and clears the field.
    pub fn apply_created(&mut self, categories: &mut Vec<Category>, created: Category) {
        categories.push(created);
        self.name.clear();
    }

    /// Patches the renamed category by id and returns to create mode.
    pub fn apply_renamed(&mut self, categories: &mut [Category], id: i64, name: &str) {
        for category in categories.iter_mut().filter(|c| c.id == id) {
            category.name = name.to_string();
        }
        self.cancel_edit();
    }

    /// Drops a deleted category; cancels the edit if it was the one open.
    pub fn apply_deleted(&mut self, categories: &mut Vec<Category>, id: i64) {
        categories.retain(|c| c.id != id);
        if self.editing == Some(id) {
            self.cancel_edit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn cats() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Pintura".to_string(),
            },
            Category {
                id: 2,
                name: "Tejido".to_string(),
            },
        ]
    }

    #[test]
    fn test_blank_name_prepares_nothing() {
        let mut editor = CategoryEditor::default();
        assert_eq!(editor.prepare().unwrap(), None);
        editor.set_name("   ");
        assert_eq!(editor.prepare().unwrap(), None);
    }

    #[test]
    fn test_overlong_name_is_an_error() {
        let mut editor = CategoryEditor::default();
        editor.set_name("x".repeat(101));
        assert!(matches!(
            editor.prepare(),
            Err(CoreError::Validation(ValidationError::TooLong { max: 100, .. }))
        ));

        editor.set_name("x".repeat(100));
        assert!(matches!(
            editor.prepare(),
            Ok(Some(CategoryAction::Create { .. }))
        ));
    }

    #[test]
    fn test_create_flow() {
        let mut editor = CategoryEditor::default();
        editor.set_name("Resina");
        assert_eq!(
            editor.prepare().unwrap(),
            Some(CategoryAction::Create {
                name: "Resina".to_string()
            })
        );

        let mut list = cats();
        editor.apply_created(
            &mut list,
            Category {
                id: 3,
                name: "Resina".to_string(),
            },
        );
        assert_eq!(list.last().unwrap().id, 3);
        assert_eq!(editor.name(), "");
    }

    #[test]
    fn test_rename_flow() {
        let mut list = cats();
        let mut editor = CategoryEditor::default();
        editor.start_edit(&list[1]);
        editor.set_name("Tejidos");

        assert_eq!(
            editor.prepare().unwrap(),
            Some(CategoryAction::Rename {
                id: 2,
                name: "Tejidos".to_string()
            })
        );

        editor.apply_renamed(&mut list, 2, "Tejidos");
        assert_eq!(list[1].name, "Tejidos");
        assert_eq!(list[0].name, "Pintura");
        assert_eq!(editor.editing(), None);
        assert_eq!(editor.name(), "");
    }

    #[test]
    fn test_delete_cancels_matching_edit_only() {
        let mut list = cats();
        let mut editor = CategoryEditor::default();
        editor.start_edit(&list[0]);

        editor.apply_deleted(&mut list, 2);
        assert_eq!(editor.editing(), Some(1));
        assert_eq!(list.len(), 1);

        editor.apply_deleted(&mut list, 1);
        assert_eq!(editor.editing(), None);
        assert!(list.is_empty());
    }
}
