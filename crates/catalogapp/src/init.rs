//! # Startup
//!
//! [`initialize`] turns a data directory into a ready [`CatalogContext`]:
//!
//! 1. Resolve the data directory (see [`resolve_data_dir`]).
//! 2. Load [`CatalogConfig`] from `catalog.toml` there, with `CATALOG__*`
//!    environment overrides, falling back to compiled defaults.
//! 3. Build the configured backend behind a [`CatalogStore`].
//! 4. Seed demo data into an empty catalog when `auto_seed` is on.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (the CLI's `--data`) wins.
//! 2. Otherwise the `CATALOG_DATA` environment variable.
//! 3. Otherwise the OS-appropriate data directory (via the `directories` crate).

use crate::api::CatalogApi;
use crate::config::{BackendKind, CatalogConfig};
use crate::error::{CatalogError, Result};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CATALOG_DATA";

/// Store type used by [`initialize`]; the backend is picked at runtime.
pub type DynStore = CatalogStore<Box<dyn StorageBackend>>;

pub struct CatalogContext {
    pub api: CatalogApi<DynStore>,
    pub config: CatalogConfig,
    pub data_dir: PathBuf,
}

/// Pick the data directory from the override, the environment, or the OS.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "catalog", "catalog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Storage("Could not determine a data directory".to_string()))
}

/// Load `catalog.toml` from `data_dir`. A missing or unreadable file yields
/// the defaults.
pub fn load_config(data_dir: PathBuf) -> CatalogConfig {
    Clapfig::builder()
        .app_name("catalog")
        .file_name("catalog.toml")
        .search_paths(vec![SearchPath::Path(data_dir)])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Build a store for `config` rooted at `data_dir`.
pub fn open_store(config: &CatalogConfig, data_dir: PathBuf) -> DynStore {
    let backend: Box<dyn StorageBackend> = match config.backend {
        BackendKind::File => Box::new(FsBackend::new(data_dir).with_file_name(&config.data_file)),
        BackendKind::Memory => Box::new(MemBackend::new()),
    };
    CatalogStore::with_backend(backend)
}

/// Initialize the catalog context: data directory, configuration and store.
///
/// # Examples
///
/// ```ignore
/// // Default location (CATALOG_DATA or the OS data directory)
/// let ctx = initialize(None)?;
///
/// // Explicit data directory
/// let ctx = initialize(Some(PathBuf::from("/srv/catalog")))?;
/// ```
pub fn initialize(data_override: Option<PathBuf>) -> Result<CatalogContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(data_dir.clone());

    let store = open_store(&config, data_dir.clone());
    debug!(location = %store.location(), backend = ?config.backend, "Opened catalog store");

    let api = CatalogApi::new(store).with_enforcer(config.enforcer());
    if config.auto_seed {
        if let Some(stats) = api.seed_if_empty()? {
            info!(resources = stats.resources, "Auto-seeded empty catalog");
        }
    }

    Ok(CatalogContext {
        api,
        config,
        data_dir,
    })
}
