//! # Configuration
//!
//! Catalog configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `CATALOG__BACKEND`, `CATALOG__UNIQUE_BINDINGS`, etc.
//! 2. **Config file**: `catalog.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `file` | `file` (JSON snapshot on disk) or `memory` |
//! | `data_file` | `catalog.json` | Snapshot file name inside the data directory |
//! | `unique_bindings` | `false` | Allow at most one value per (resource, feature) |
//! | `auto_seed` | `false` | Load demo data into an empty catalog at startup |

use crate::integrity::Enforcer;
use crate::store::fs_backend::DEFAULT_DATA_FILE;
use confique::Config;
use serde::{Deserialize, Serialize};

/// Where the catalog snapshot lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Memory,
}

/// Configuration for the catalog, stored in `catalog.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Storage backend: "file" or "memory"
    #[config(default = "file")]
    pub backend: BackendKind,

    /// Snapshot file name inside the data directory
    #[config(default = "catalog.json")]
    pub data_file: String,

    /// Reject a second value for an already bound (resource, feature) pair
    #[config(default = false)]
    pub unique_bindings: bool,

    /// Seed demo data when the catalog is empty at startup
    #[config(default = false)]
    pub auto_seed: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_file: DEFAULT_DATA_FILE.to_string(),
            unique_bindings: false,
            auto_seed: false,
        }
    }
}

impl CatalogConfig {
    /// The integrity policy this configuration asks for.
    pub fn enforcer(&self) -> Enforcer {
        Enforcer::new().with_unique_bindings(self.unique_bindings)
    }
}
