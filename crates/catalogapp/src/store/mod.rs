//! # Storage Layer
//!
//! The catalog is persisted as one snapshot of four collections, [`Tables`].
//! Storage is split in two layers:
//!
//! 1. **Backend** ([`backend::StorageBackend`]): raw I/O. Loads and saves a
//!    whole snapshot. Saving MUST be atomic: readers see the old snapshot or
//!    the new one, never a mix.
//! 2. **Store** ([`catalog_store::CatalogStore`]): the transactional boundary.
//!    Implements [`DataStore`] on top of any backend.
//!
//! ## Transactions
//!
//! Every mutating operation is one call to [`DataStore::transact`]:
//!
//! 1. Take the store's write lock, then the backend's lock if it has one
//!    (the file backend locks `.catalog.json.lock`, so writers in other
//!    processes are serialized too).
//! 2. Load the current snapshot.
//! 3. Run validation and mutation against the private copy.
//! 4. If that returned `Ok`, save the copy. If it returned `Err`, drop it.
//!
//! Reference checks and the writes they guard therefore see the same state,
//! and a cascade either lands entirely or not at all.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-process, for tests and ephemeral use.
//! - [`fs_backend::FsBackend`]: a JSON file written via temp file + rename.
//!
//! ## Storage Layout (filesystem)
//!
//! ```text
//! <data dir>/
//! ├── catalog.toml        # Optional configuration
//! ├── catalog.json        # Snapshot of all four collections
//! └── .catalog.json.lock  # Writer lock
//! ```

use crate::error::Result;
use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
use crate::model::{Category, Feature, FeatureValue, Resource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod backend;
pub mod catalog_store;
pub mod fs_backend;
pub mod lock;
pub mod mem_backend;
pub mod memory;

/// One consistent snapshot of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    #[serde(default)]
    pub categories: BTreeMap<CategoryId, Category>,
    #[serde(default)]
    pub features: BTreeMap<FeatureId, Feature>,
    #[serde(default)]
    pub resources: BTreeMap<ResourceId, Resource>,
    #[serde(default)]
    pub feature_values: BTreeMap<FeatureValueId, FeatureValue>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.features.is_empty()
            && self.resources.is_empty()
            && self.feature_values.is_empty()
    }

    pub fn features_in(&self, category_id: CategoryId) -> impl Iterator<Item = &Feature> {
        self.features
            .values()
            .filter(move |f| f.category_id == category_id)
    }

    pub fn resources_in(&self, category_id: CategoryId) -> impl Iterator<Item = &Resource> {
        self.resources
            .values()
            .filter(move |r| r.category_id == category_id)
    }

    pub fn values_of_resource(
        &self,
        resource_id: ResourceId,
    ) -> impl Iterator<Item = &FeatureValue> {
        self.feature_values
            .values()
            .filter(move |v| v.resource_id == resource_id)
    }

    pub fn values_of_feature(&self, feature_id: FeatureId) -> impl Iterator<Item = &FeatureValue> {
        self.feature_values
            .values()
            .filter(move |v| v.feature_id == feature_id)
    }
}

/// Row counts for each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub categories: usize,
    pub features: usize,
    pub resources: usize,
    pub feature_values: usize,
}

impl From<&Tables> for CatalogStats {
    fn from(tables: &Tables) -> Self {
        Self {
            categories: tables.categories.len(),
            features: tables.features.len(),
            resources: tables.resources.len(),
            feature_values: tables.feature_values.len(),
        }
    }
}

/// Abstract interface for catalog storage.
///
/// Implementations must give [`transact`](DataStore::transact) all-or-nothing
/// semantics and serialize concurrent writers.
pub trait DataStore: Send + Sync {
    /// A consistent read-only copy of the catalog.
    fn snapshot(&self) -> Result<Tables>;

    /// Run `f` against a private copy of the catalog and commit the copy
    /// only if `f` succeeds.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>;
}
