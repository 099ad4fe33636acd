//! # Catalog
//!
//! The read-only list of books the store sells, in load order.
//!
//! ## Lookup Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find("0140444300")                                                     │
//! │                                                                         │
//! │   [0] 0001062417  ✗                                                     │
//! │   [1] 0140444300  ✓  ◄── returned (first match wins)                    │
//! │   [2] 0140444300      never reached                                     │
//! │                                                                         │
//! │  Linear scan in load order. Duplicate ISBNs are tolerated; the         │
//! │  earliest record shadows later ones.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading from disk and the process-wide instance live in shelf-store;
//! this type only owns the records.

use crate::types::BookRecord;

/// An ordered, immutable collection of book records.
///
/// Intentionally not `Clone`: there is one catalog and everybody borrows it.
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<BookRecord>,
}

impl Catalog {
    /// Builds a catalog from records in the order given.
    pub fn from_records(records: impl IntoIterator<Item = BookRecord>) -> Self {
        Catalog {
            books: records.into_iter().collect(),
        }
    }

    /// Returns the first record whose ISBN matches, or `None`.
    ///
    /// ```rust
    /// use shelf_core::{BookRecord, Catalog, Money};
    ///
    /// let catalog = Catalog::from_records([
    ///     BookRecord::new("0140444300", "Les Miserables", "Victor Hugo", Money::from_cents(1299)).unwrap(),
    /// ]);
    /// assert_eq!(catalog.find("0140444300").unwrap().title(), "Les Miserables");
    /// assert!(catalog.find("9780895656926").is_none());
    /// ```
    pub fn find(&self, isbn: &str) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.isbn() == isbn)
    }

    /// Number of loaded records, duplicates included.
    pub fn size(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Iterates records in load order.
    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.books.iter()
    }

    /// ISBNs that appear more than once, each reported once, in load order.
    pub fn duplicate_isbns(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (index, book) in self.books.iter().enumerate() {
            let seen_before = self.books[..index]
                .iter()
                .any(|earlier| earlier.isbn() == book.isbn());
            if seen_before && !duplicates.contains(&book.isbn()) {
                duplicates.push(book.isbn());
            }
        }
        duplicates
    }
}
