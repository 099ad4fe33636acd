//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Transfer / session rule violations             │
//! │  └── ValidationError  - Malformed book record fields                   │
//! │                                                                         │
//! │  shelf-store errors (separate crate)                                   │
//! │  └── StoreError       - Catalog load, parse and config failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / StoreError → checkout binary      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing catalog entry is NOT an error: `Catalog::find` returns `None`
//! and checkout charges nothing for that book.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A transfer asked to move more books than the source cart holds.
    ///
    /// ## When This Occurs
    /// - Caller passed a count larger than `source.len()`
    ///
    /// Checked before the first move, so no cart is modified.
    #[error("Cannot move {requested} books from a cart holding {available}")]
    TransferExceedsSource { requested: usize, available: usize },

    /// A checkout step was called out of order.
    ///
    /// ## User Workflow
    /// ```text
    /// Empty ──populate_cart──► Shopping ──move_to_working_area──► Transferred
    ///                                                                  │
    /// Totaled ◄──total── Draining ◄──drain_to_checkout_line────────────┘
    /// ```
    #[error("Cannot {operation} while session is {current}")]
    InvalidSessionState {
        operation: &'static str,
        current: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Book record validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. bad characters in an ISBN, bad decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
