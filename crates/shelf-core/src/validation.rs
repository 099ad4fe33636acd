//! # Validation Module
//!
//! Field checks applied to every book record before it enters the catalog.
//!
//! Titles and authors are free text and may be empty.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: shelf-store reader                                           │
//! │  ├── Quoting, commas, price syntax                                     │
//! │  └── Reports the offending line number                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── ISBN present, price not negative                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//! use shelf_core::validation::{validate_isbn, validate_price};
//!
//! assert!(validate_isbn("0001062417").is_ok());
//! assert!(validate_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an ISBN: it must not be blank.
///
/// Nothing else is checked. Stores carry house codes such as
/// `"54782169785"` and hyphenated or spaced forms, and all of them should
/// still be looked up (and possibly not found).
///
/// ```rust
/// use shelf_core::validation::validate_isbn;
///
/// assert!(validate_isbn("978-0-545-31058-1").is_ok());
/// assert!(validate_isbn("0-19 852663-6").is_ok());
/// assert!(validate_isbn("").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    if isbn.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "isbn".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price: zero is allowed, negative is not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}
