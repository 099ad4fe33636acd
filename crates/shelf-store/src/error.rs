//! # Store Error Types
//!
//! Error types for loading the catalog and the configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error ─────────► StoreError::LoadFailure { path }            │
//! │  bad record syntax ──────► StoreError::Parse { line }                  │
//! │  ValidationError ────────► StoreError::Parse { line }                  │
//! │  toml::de::Error ────────► StoreError::ConfigParse                     │
//! │  CoreError ──────────────► StoreError::Core                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout binary prints the message and exits non-zero                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use shelf_core::CoreError;
use thiserror::Error;

/// Errors surfaced by shelf-store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file could not be opened or read.
    ///
    /// ## When This Occurs
    /// - File doesn't exist
    /// - Permission denied
    /// - Not valid UTF-8
    #[error("Failed to load catalog from {path}: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is readable but malformed.
    #[error("Malformed catalog record at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The process-wide catalog was already set up.
    #[error("Catalog already installed")]
    AlreadyInstalled,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file is not valid TOML for `StoreConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Checkout rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a Parse error for a given line.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_messages() {
        let err = StoreError::LoadFailure {
            path: PathBuf::from("database.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load catalog from database.txt: No such file or directory"
        );

        let err = StoreError::parse(3, "missing comma after title");
        assert_eq!(
            err.to_string(),
            "Malformed catalog record at line 3: missing comma after title"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::TransferExceedsSource {
            requested: 4,
            available: 2,
        }
        .into();
        assert_eq!(err.to_string(), "Cannot move 4 books from a cart holding 2");
    }
}
