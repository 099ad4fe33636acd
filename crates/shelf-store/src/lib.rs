//! # shelf-store: Catalog Loading for Shelf Checkout
//!
//! Everything in Shelf Checkout that touches the file system or the
//! environment: the catalog file reader, the process-wide catalog, the
//! configuration, and the trace renderers used by the `checkout` binary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shelf Checkout Data Flow                           │
//! │                                                                         │
//! │  checkout binary                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shelf-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐         │   │
//! │  │   │   config     │  │   reader     │  │   catalog    │         │   │
//! │  │   │ StoreConfig  │─►│ parse_records│─►│  instance()  │         │   │
//! │  │   │ toml + env   │  │ quoted CSV   │  │  OnceLock    │         │   │
//! │  │   └──────────────┘  └──────────────┘  └──────┬───────┘         │   │
//! │  │                                              │                  │   │
//! │  │   ┌──────────────┐                           │                  │   │
//! │  │   │   trace      │ ◄── MoveEvent ── CheckoutSession (core)      │   │
//! │  │   │ TableObserver│                                              │   │
//! │  │   └──────────────┘                                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  database.txt                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelf_core::checkout::default_shopping_list;
//! use shelf_core::CheckoutSession;
//! use shelf_store::trace::LogObserver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = shelf_store::instance()?;
//! let receipt = CheckoutSession::new(catalog).run(default_shopping_list()?, &mut LogObserver)?;
//! println!("{receipt}");
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod reader;
pub mod trace;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{install, instance, instance_with, load_catalog};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
