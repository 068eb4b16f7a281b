//! # Error Types
//!
//! Domain-specific error types for milena-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  milena-core errors (this file)                                        │
//! │  ├── CoreError        - Storefront rule violations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  milena-remote errors (separate crate)                                 │
//! │  └── RemoteError      - Hosted backend call failures                   │
//! │                                                                         │
//! │  Storefront API errors (in app)                                        │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! │        RemoteError ───────────────► ApiError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (file name, index, limit)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront logic errors.
///
/// These are the client-side short-circuits: every one of them is raised
/// before any remote call is attempted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Adding files would push the product past the image ceiling.
    ///
    /// ## When This Occurs
    /// ```text
    /// existing (2) + staged (2) + selected (2) = 6 > 5
    ///      │
    ///      ▼
    /// TooManyImages { max: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Staged and existing sets are left untouched
    /// ```
    #[error("A product can have at most {max} images ({requested} requested)")]
    TooManyImages { max: usize, requested: usize },

    /// Submit attempted with neither existing nor staged images.
    #[error("A product needs at least one image")]
    NoImages,

    /// Username/password pair matched no known admin.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An admin-only operation was attempted while logged out.
    #[error("Not logged in")]
    NotLoggedIn,

    /// A submit is already in flight for this form.
    #[error("Operation already in progress")]
    Busy,

    /// The product form is not open.
    #[error("No product form is open")]
    FormClosed,

    /// Referenced product or category is not in the loaded list.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Positional removal outside the current list.
    #[error("Index {index} out of range for {list} (len {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any remote call runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., non-numeric category id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for a missing required field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TooManyImages {
            max: 5,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            "A product can have at most 5 images (6 requested)"
        );

        let err = CoreError::IndexOutOfRange {
            list: "staged images",
            index: 3,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for staged images (len 2)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("category").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
