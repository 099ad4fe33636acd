//! # Cart
//!
//! A labeled last-in-first-out stack of books.
//!
//! ## Only The Top Moves
//! ```text
//!        push ──┐   ┌──► pop
//!               ▼   │
//!         ┌─────────────┐
//!         │  Les Mis    │  ◄── top
//!         ├─────────────┤
//!         │  Eat pray…  │
//!         ├─────────────┤
//!         │  Hunger G…  │  ◄── bottom (pushed first)
//!         └─────────────┘
//! ```
//!
//! There is no API to reach below the top item. The transfer engine relies
//! on that to guarantee one-book-at-a-time moves.

use serde::{Deserialize, Serialize};

use crate::types::BookRecord;

pub const BROKEN_CART_LABEL: &str = "Broken Cart";
pub const WORKING_CART_LABEL: &str = "Working Cart";
pub const SPARE_CART_LABEL: &str = "Spare Cart";

/// A LIFO stack of books with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    label: String,
    /// Bottom at index 0, top at the end.
    books: Vec<BookRecord>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new(label: impl Into<String>) -> Self {
        Cart {
            label: label.into(),
            books: Vec::new(),
        }
    }

    /// Creates a cart by pushing `books` in order; the first ends at the bottom.
    pub fn with_books(label: impl Into<String>, books: impl IntoIterator<Item = BookRecord>) -> Self {
        let mut cart = Cart::new(label);
        for book in books {
            cart.push(book);
        }
        cart
    }

    pub fn push(&mut self, book: BookRecord) {
        self.books.push(book);
    }

    pub fn pop(&mut self) -> Option<BookRecord> {
        self.books.pop()
    }

    pub fn top(&self) -> Option<&BookRecord> {
        self.books.last()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Iterates from top to bottom without removing anything.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &BookRecord> {
        self.books.iter().rev()
    }

    /// ISBNs from top to bottom.
    pub fn isbns_top_down(&self) -> Vec<String> {
        self.iter_top_down().map(|b| b.isbn().to_string()).collect()
    }

    /// A point-in-time copy for tracing.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            label: self.label.clone(),
            books: self.iter_top_down().cloned().collect(),
        }
    }
}

/// A frozen copy of a cart's contents, top first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub label: String,
    pub books: Vec<BookRecord>,
}

impl CartSnapshot {
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
