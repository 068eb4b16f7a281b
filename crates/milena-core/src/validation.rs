//! # Validation Module
//!
//! Input validation utilities for MilenaShop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── `required` attributes on name/category inputs                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: View models (Rust)                                           │
//! │  ├── Image ceiling and "at least one image"                            │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted backend                                               │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints (category delete)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use milena_core::validation::{parse_category_id, validate_product_name};
//!
//! validate_product_name("Cuadro Atardecer").unwrap();
//! assert_eq!(parse_category_id("3").unwrap(), Some(3));
//! assert_eq!(parse_category_id("").unwrap(), None);
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest category name accepted.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use milena_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Bufanda tejida").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category name.
///
/// Blank names are reported as `Required`; the category editor treats that
/// as "ignore the submit" rather than as an error to show.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("category name"));
    }

    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: MAX_CATEGORY_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a WhatsApp contact number.
///
/// ## Rules
/// - Digits only, international format without `+` (e.g. `584120183859`)
/// - Between 8 and 15 digits
pub fn validate_whatsapp_number(number: &str) -> ValidationResult<()> {
    if number.is_empty() {
        return Err(ValidationError::required("whatsapp_number"));
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "whatsapp_number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(8..=15).contains(&number.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "whatsapp_number".to_string(),
            reason: "must be between 8 and 15 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the category `<select>` value into a numeric id.
///
/// ## Returns
/// - `Ok(None)` for an empty selection
/// - `Ok(Some(id))` for a positive integer
/// - `Err(InvalidFormat)` otherwise
pub fn parse_category_id(input: &str) -> ValidationResult<Option<i64>> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<i64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ValidationError::InvalidFormat {
            field: "category".to_string(),
            reason: format!("'{}' is not a category id", input),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cuadro Atardecer").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"a".repeat(200)).is_ok());
        assert!(validate_product_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_product_name_counts_chars_not_bytes() {
        // 200 two-byte characters
        assert!(validate_product_name(&"ñ".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Resina").is_ok());
        assert!(matches!(
            validate_category_name(" \t "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_category_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_whatsapp_number() {
        assert!(validate_whatsapp_number("584120183859").is_ok());
        assert!(validate_whatsapp_number("").is_err());
        assert!(validate_whatsapp_number("+584120183859").is_err());
        assert!(validate_whatsapp_number("1234").is_err());
    }

    #[test]
    fn test_parse_category_id() {
        assert_eq!(parse_category_id("12").unwrap(), Some(12));
        assert_eq!(parse_category_id(" 4 ").unwrap(), Some(4));
        assert_eq!(parse_category_id("").unwrap(), None);
        assert!(parse_category_id("abc").is_err());
        assert!(parse_category_id("0").is_err());
        assert!(parse_category_id("-3").is_err());
    }
}
