//! # Domain Types
//!
//! ## BookRecord Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookRecord                                                             │
//! │  ─────────────                                                          │
//! │  isbn    ◄── identity: Eq, Hash, Ord look at this field only           │
//! │  title       informational                                             │
//! │  author      informational                                             │
//! │  price       informational (catalog copy is the source of truth)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A shopping-list entry and the catalog entry for the same ISBN compare
//! equal even though the shopping entry has no author and no price.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_isbn, validate_price};

// =============================================================================
// Book Record
// =============================================================================

/// An immutable book record.
///
/// Fields are private; a record never changes after construction.
/// Deserializing goes through [`BookRecord::new`], so it validates too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBookRecord")]
pub struct BookRecord {
    isbn: String,
    title: String,
    author: String,
    price: Money,
}

impl BookRecord {
    /// Creates a validated record.
    ///
    /// ```rust
    /// use shelf_core::{BookRecord, Money};
    ///
    /// let book = BookRecord::new("0001062417", "Early aircraft", "Maurice F. Allward", Money::from_cents(6565)).unwrap();
    /// assert_eq!(book.isbn(), "0001062417");
    /// assert!(BookRecord::new("", "No ISBN", "", Money::zero()).is_err());
    /// ```
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let record = BookRecord {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            price,
        };
        record.validate()?;
        Ok(record)
    }

    /// Creates an unpriced shopping-list entry: title and ISBN only.
    pub fn for_shopping(
        title: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(isbn, title, String::new(), Money::zero())
    }

    /// Runs every field check. Title and author are free text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_isbn(&self.isbn)?;
        validate_price(self.price)
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

/// Wire shape of a [`BookRecord`] before validation.
#[derive(Deserialize)]
struct UncheckedBookRecord {
    isbn: String,
    title: String,
    author: String,
    price: Money,
}

impl TryFrom<UncheckedBookRecord> for BookRecord {
    type Error = ValidationError;

    fn try_from(raw: UncheckedBookRecord) -> Result<Self, Self::Error> {
        BookRecord::new(raw.isbn, raw.title, raw.author, raw.price)
    }
}

impl PartialEq for BookRecord {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for BookRecord {}

impl Hash for BookRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl PartialOrd for BookRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.isbn.cmp(&other.isbn)
    }
}

/// Receipt line format: `"isbn", "title", "author", 65.65`.
///
/// Quotes and backslashes inside fields are escaped, so the output is also
/// valid catalog-file input.
impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\", \"{}\", \"{}\", {}.{:02}",
            escape(&self.isbn),
            escape(&self.title),
            escape(&self.author),
            self.price.dollars(),
            self.price.cents_part()
        )
    }
}

fn escape(field: &str) -> String {
    field.replace('\\', "\\\\").replace('"', "\\\"")
}
