//! # Process-Wide Catalog
//!
//! The one catalog every checkout session borrows.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  first instance() ──► StoreConfig ──► read file ──► parse ──► OnceLock  │
//! │                                                                  │      │
//! │  later instance() ──────────────────────────────────────────────►┘      │
//! │                                                    &'static Catalog     │
//! │                                                                         │
//! │  A failed load stores nothing; the next call tries again.              │
//! │  Nothing ever mutates or drops the catalog once stored.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::OnceLock;

use shelf_core::Catalog;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::reader::parse_records;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Returns the process-wide catalog, loading it on first use.
///
/// The file location comes from [`StoreConfig::load`] with no explicit
/// config file.
pub fn instance() -> StoreResult<&'static Catalog> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let config = StoreConfig::load(None)?;
    instance_with(&config)
}

/// Like [`instance`], but loads from `config` if nothing is installed yet.
pub fn instance_with(config: &StoreConfig) -> StoreResult<&'static Catalog> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let catalog = load_catalog(&config.catalog.path)?;
    Ok(CATALOG.get_or_init(|| catalog))
}

/// Installs an already-built catalog as the process-wide instance.
///
/// ## Errors
/// [`StoreError::AlreadyInstalled`] if a catalog is already in place.
pub fn install(catalog: Catalog) -> StoreResult<&'static Catalog> {
    match CATALOG.set(catalog) {
        Ok(()) => CATALOG.get().ok_or(StoreError::AlreadyInstalled),
        Err(_) => Err(StoreError::AlreadyInstalled),
    }
}

/// Reads and parses a catalog file without touching the process-wide slot.
pub fn load_catalog(path: &Path) -> StoreResult<Catalog> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::LoadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_records(parse_records(&contents)?);
    for isbn in catalog.duplicate_isbns() {
        warn!(isbn = %isbn, "Duplicate ISBN in catalog, first record wins");
    }

    info!(?path, books = catalog.size(), "Catalog loaded");
    Ok(catalog)
}
