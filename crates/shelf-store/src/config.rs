//! # Store Configuration
//!
//! Where the catalog lives and whether transfers are traced.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the binary)       │
//! │     --catalog ./database.txt --trace                                   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHELF_CATALOG_PATH=./database.txt                                  │
//! │     SHELF_TRACE=true                                                   │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/shelf-checkout/shelf.toml (Linux)                        │
//! │     ~/Library/Application Support/com.shelf.checkout/shelf.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     database.txt in the working directory, tracing off                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "database.txt"
//!
//! [trace]
//! enabled = false
//! title_width = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Default catalog file name, resolved against the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "database.txt";

// =============================================================================
// Catalog Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Path to the catalog record file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE)
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: default_catalog_path(),
        }
    }
}

// =============================================================================
// Trace Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSettings {
    /// Print the three-cart table after every move.
    #[serde(default)]
    pub enabled: bool,

    /// Titles longer than this are cut and end in "...".
    #[serde(default = "default_title_width")]
    pub title_width: usize,
}

fn default_title_width() -> usize {
    20
}

impl Default for TraceSettings {
    fn default() -> Self {
        TraceSettings {
            enabled: false,
            title_width: default_title_width(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub trace: TraceSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document; missing sections fall back to defaults.
    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "catalog path must not be empty".into(),
            ));
        }

        // Room for at least one character plus "..."
        if self.trace.title_width < 4 {
            return Err(StoreError::InvalidConfig(format!(
                "trace title_width must be at least 4, got {}",
                self.trace.title_width
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SHELF_*` overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("SHELF_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(trace) = lookup("SHELF_TRACE") {
            match trace.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.trace.enabled = true,
                "0" | "false" | "no" | "off" => self.trace.enabled = false,
                _ => warn!(value = %trace, "Unknown SHELF_TRACE value, ignoring"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelf", "checkout")
            .map(|dirs| dirs.config_dir().join("shelf.toml"))
    }
}
