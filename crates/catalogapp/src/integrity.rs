//! # Integrity Enforcer
//!
//! The single place where the catalog's rules live. Every store consults an
//! [`Enforcer`] inside its transaction before writing:
//!
//! - **Reference check**: a `categoryId`, `resourceId` or `featureId` in a
//!   payload must resolve, or the write fails with a reference error. Fields
//!   are never silently dropped.
//! - **Type check**: a feature value must populate exactly the slot matching
//!   its feature's declared type.
//! - **Type immutability**: a feature's declared type cannot change once it
//!   exists, so stored values can never drift from their feature.
//! - **Binding uniqueness** (optional): at most one value per
//!   (resource, feature) pair when `unique_bindings` is on.
//! - **Cascade**: deleting a parent computes the full set of dependents,
//!   transitively, as a [`Cascade`] applied in the same transaction.
//!
//! The enforcer holds no state besides its policy switches. It only reads
//! [`Tables`]; mutation happens in the store that called it.
//!
//! ## Cascade Rules
//!
//! | Deleted | Also removed |
//! |---------|--------------|
//! | Category | its features, its resources, every value bound to either |
//! | Feature | every value with that `featureId` |
//! | Resource | every value with that `resourceId` |

use crate::error::{CatalogError, EntityKind, Result};
use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
use crate::model::{Category, Feature, Resource};
use crate::store::Tables;
use crate::values::{Value, ValueSlots, ValueType};
use serde::Serialize;
use std::collections::BTreeSet;

/// Integrity policy consulted by every store on write and delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enforcer {
    unique_bindings: bool,
}

impl Enforcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a second value for an already bound (resource, feature) pair.
    pub fn with_unique_bindings(mut self, unique: bool) -> Self {
        self.unique_bindings = unique;
        self
    }

    pub fn unique_bindings(&self) -> bool {
        self.unique_bindings
    }

    // --- Reference checks ---

    pub fn require_category<'t>(&self, tables: &'t Tables, id: CategoryId) -> Result<&'t Category> {
        tables
            .categories
            .get(&id)
            .ok_or_else(|| CatalogError::reference(EntityKind::Category, id))
    }

    pub fn require_feature<'t>(&self, tables: &'t Tables, id: FeatureId) -> Result<&'t Feature> {
        tables
            .features
            .get(&id)
            .ok_or_else(|| CatalogError::reference(EntityKind::Feature, id))
    }

    pub fn require_resource<'t>(&self, tables: &'t Tables, id: ResourceId) -> Result<&'t Resource> {
        tables
            .resources
            .get(&id)
            .ok_or_else(|| CatalogError::reference(EntityKind::Resource, id))
    }

    // --- Type checks ---

    /// Turn caller-supplied slots into a value legal for `feature`.
    pub fn check_value(&self, feature: &Feature, slots: ValueSlots) -> Result<Value> {
        slots.resolve(&feature.name, feature.value_type)
    }

    /// A feature may be "updated" to the type it already has, nothing else.
    pub fn check_type_change(&self, feature: &Feature, requested: ValueType) -> Result<()> {
        if feature.value_type == requested {
            return Ok(());
        }
        Err(CatalogError::Validation(format!(
            "Feature type is immutable: {} is {}, cannot change to {}",
            feature.name, feature.value_type, requested
        )))
    }

    /// Enforce binding uniqueness when enabled. `current` is the value being
    /// updated, which does not conflict with itself.
    pub fn check_binding(
        &self,
        tables: &Tables,
        resource_id: ResourceId,
        feature_id: FeatureId,
        current: Option<FeatureValueId>,
    ) -> Result<()> {
        if !self.unique_bindings {
            return Ok(());
        }
        let taken = tables
            .values_of_resource(resource_id)
            .any(|v| v.feature_id == feature_id && Some(v.id) != current);
        if taken {
            return Err(CatalogError::Validation(format!(
                "Resource {} already has a value for feature {}",
                resource_id, feature_id
            )));
        }
        Ok(())
    }

    // --- Cascades ---

    /// Everything that goes away with category `id`, the category included.
    pub fn cascade_category(&self, tables: &Tables, id: CategoryId) -> Cascade {
        let mut cascade = Cascade::default();
        cascade.categories.insert(id);
        for feature in tables.features_in(id) {
            self.extend_feature(tables, feature.id, &mut cascade);
        }
        for resource in tables.resources_in(id) {
            self.extend_resource(tables, resource.id, &mut cascade);
        }
        cascade
    }

    /// Feature `id` and every value bound to it.
    pub fn cascade_feature(&self, tables: &Tables, id: FeatureId) -> Cascade {
        let mut cascade = Cascade::default();
        self.extend_feature(tables, id, &mut cascade);
        cascade
    }

    /// Resource `id` and every value bound to it.
    pub fn cascade_resource(&self, tables: &Tables, id: ResourceId) -> Cascade {
        let mut cascade = Cascade::default();
        self.extend_resource(tables, id, &mut cascade);
        cascade
    }

    fn extend_feature(&self, tables: &Tables, id: FeatureId, cascade: &mut Cascade) {
        cascade.features.insert(id);
        cascade
            .feature_values
            .extend(tables.values_of_feature(id).map(|v| v.id));
    }

    fn extend_resource(&self, tables: &Tables, id: ResourceId, cascade: &mut Cascade) {
        cascade.resources.insert(id);
        cascade
            .feature_values
            .extend(tables.values_of_resource(id).map(|v| v.id));
    }
}

/// The set of records removed by one delete, root included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cascade {
    pub categories: BTreeSet<CategoryId>,
    pub features: BTreeSet<FeatureId>,
    pub resources: BTreeSet<ResourceId>,
    pub feature_values: BTreeSet<FeatureValueId>,
}

impl Cascade {
    /// Total number of records in the cascade.
    pub fn len(&self) -> usize {
        self.categories.len()
            + self.features.len()
            + self.resources.len()
            + self.feature_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record in the cascade from `tables`.
    pub fn apply(&self, tables: &mut Tables) {
        for id in &self.feature_values {
            tables.feature_values.remove(id);
        }
        for id in &self.features {
            tables.features.remove(id);
        }
        for id in &self.resources {
            tables.resources.remove(id);
        }
        for id in &self.categories {
            tables.categories.remove(id);
        }
    }
}
