//! # shelf-core: Pure Checkout Logic for Shelf Checkout
//!
//! Everything a bookstore checkout needs that does not touch the disk:
//! prices, book records, the catalog lookup, the careful cart transfer and
//! the checkout state machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shelf Checkout Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               checkout binary (shelf-store)                     │   │
//! │  │     load config ──► load catalog ──► run session ──► print      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │ transfer  │  │ checkout  │  │   │
//! │  │   │BookRecord │  │  Catalog  │  │  Engine   │  │  Session  │  │   │
//! │  │   │   Money   │  │   find    │  │ Observer  │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO ENV • NO CONSOLE • NO GLOBALS                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `BookRecord`
//! - [`money`] - Money type with integer cents
//! - [`validation`] - Record field checks
//! - [`catalog`] - Ordered, read-only book lookup
//! - [`cart`] - LIFO book cart
//! - [`transfer`] - One-book-at-a-time cart transfer and its trace events
//! - [`checkout`] - Checkout session and receipt
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::transfer::NoTrace;
//! use shelf_core::{BookRecord, Catalog, CheckoutSession, Money};
//!
//! let catalog = Catalog::from_records([
//!     BookRecord::new("A", "Alpha", "Ann", Money::from_cents(1000)).unwrap(),
//!     BookRecord::new("B", "Beta", "Bob", Money::from_cents(500)).unwrap(),
//! ]);
//!
//! let cart = ["B", "C", "A"].map(|isbn| BookRecord::for_shopping("Wanted", isbn).unwrap());
//! let receipt = CheckoutSession::new(&catalog).run(cart, &mut NoTrace).unwrap();
//!
//! assert_eq!(receipt.amount_due, Money::from_cents(1500));
//! assert_eq!(receipt.no_charge_count(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::Catalog;
pub use checkout::{CheckoutSession, Receipt, ReceiptLine, SessionState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use transfer::{MoveEvent, Slot, Snapshot, TraceObserver, TransferReport};
pub use types::BookRecord;
