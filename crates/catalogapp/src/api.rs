//! # API Facade
//!
//! A **thin facade** over the command layer and the single entry point for
//! every catalog operation, whichever client drives it.
//!
//! The facade:
//! - **Owns** the store and the [`Enforcer`] policy
//! - **Dispatches** each call to the matching command function
//! - **Returns** entities or [`CatalogError`](crate::error::CatalogError)
//!
//! It holds no business logic of its own; that lives in `commands/*.rs`.
//!
//! ## Generic Over DataStore
//!
//! `CatalogApi<S: DataStore>` works with any store:
//! - Production: `CatalogApi<CatalogStore<Box<dyn StorageBackend>>>`
//! - Testing: `CatalogApi<InMemoryStore>`
//!
//! The facade only takes `&self`: stores serialize their own writers, so one
//! `CatalogApi` can be shared across threads.

use crate::commands::{self, doctor::DoctorReport};
use crate::error::Result;
use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
use crate::integrity::{Cascade, Enforcer};
use crate::model::{
    Category, Feature, FeatureUpdate, FeatureValue, FeatureValueDetail, NewFeature, NewResource,
    Resource, ResourceUpdate,
};
use crate::store::{CatalogStats, DataStore};
use crate::values::{ValueSlots, ValueType};

/// The main API facade for catalog operations.
pub struct CatalogApi<S: DataStore> {
    store: S,
    enforcer: Enforcer,
}

impl<S: DataStore> CatalogApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            enforcer: Enforcer::new(),
        }
    }

    pub fn with_enforcer(mut self, enforcer: Enforcer) -> Self {
        self.enforcer = enforcer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn enforcer(&self) -> &Enforcer {
        &self.enforcer
    }

    // --- Categories ---

    pub fn create_category(&self, name: &str) -> Result<Category> {
        commands::categories::create(&self.store, name)
    }

    pub fn get_category(&self, id: CategoryId) -> Result<Category> {
        commands::categories::get(&self.store, id)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        commands::categories::list(&self.store)
    }

    pub fn update_category(&self, id: CategoryId, name: &str) -> Result<Category> {
        commands::categories::update(&self.store, id, name)
    }

    pub fn delete_category(&self, id: CategoryId) -> Result<Cascade> {
        commands::categories::delete(&self.store, &self.enforcer, id)
    }

    // --- Features ---

    pub fn create_feature(&self, input: NewFeature) -> Result<Feature> {
        commands::features::create(&self.store, &self.enforcer, input)
    }

    pub fn get_feature(&self, id: FeatureId) -> Result<Feature> {
        commands::features::get(&self.store, id)
    }

    pub fn list_features(&self) -> Result<Vec<Feature>> {
        commands::features::list(&self.store)
    }

    pub fn list_features_by_category(&self, category_id: CategoryId) -> Result<Vec<Feature>> {
        commands::features::list_by_category(&self.store, category_id)
    }

    pub fn update_feature(&self, id: FeatureId, patch: FeatureUpdate) -> Result<Feature> {
        commands::features::update(&self.store, &self.enforcer, id, patch)
    }

    pub fn delete_feature(&self, id: FeatureId) -> Result<Cascade> {
        commands::features::delete(&self.store, &self.enforcer, id)
    }

    // --- Resources ---

    pub fn create_resource(&self, input: NewResource) -> Result<Resource> {
        commands::resources::create(&self.store, &self.enforcer, input)
    }

    pub fn get_resource(&self, id: ResourceId) -> Result<Resource> {
        commands::resources::get(&self.store, id)
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        commands::resources::list(&self.store)
    }

    pub fn list_resources_by_category(&self, category_id: CategoryId) -> Result<Vec<Resource>> {
        commands::resources::list_by_category(&self.store, category_id)
    }

    pub fn update_resource(&self, id: ResourceId, patch: ResourceUpdate) -> Result<Resource> {
        commands::resources::update(&self.store, &self.enforcer, id, patch)
    }

    pub fn delete_resource(&self, id: ResourceId) -> Result<Cascade> {
        commands::resources::delete(&self.store, &self.enforcer, id)
    }

    // --- Feature values ---

    pub fn create_feature_value(
        &self,
        resource_id: ResourceId,
        feature_id: FeatureId,
        slots: ValueSlots,
    ) -> Result<FeatureValue> {
        commands::feature_values::create(
            &self.store,
            &self.enforcer,
            resource_id,
            feature_id,
            slots,
        )
    }

    pub fn get_feature_value(&self, id: FeatureValueId) -> Result<FeatureValue> {
        commands::feature_values::get(&self.store, id)
    }

    pub fn list_feature_values(&self) -> Result<Vec<FeatureValue>> {
        commands::feature_values::list(&self.store)
    }

    pub fn list_feature_values_by_resource(&self, id: ResourceId) -> Result<Vec<FeatureValue>> {
        commands::feature_values::list_by_resource(&self.store, id)
    }

    pub fn list_feature_values_by_feature(&self, id: FeatureId) -> Result<Vec<FeatureValue>> {
        commands::feature_values::list_by_feature(&self.store, id)
    }

    pub fn update_feature_value(
        &self,
        id: FeatureValueId,
        slots: ValueSlots,
    ) -> Result<FeatureValue> {
        commands::feature_values::update(&self.store, &self.enforcer, id, slots)
    }

    pub fn delete_feature_value(&self, id: FeatureValueId) -> Result<FeatureValue> {
        commands::feature_values::delete(&self.store, id)
    }

    pub fn get_feature_value_detail(&self, id: FeatureValueId) -> Result<FeatureValueDetail> {
        commands::feature_values::get_detail(&self.store, id)
    }

    pub fn get_feature_value_for_resource(
        &self,
        resource_id: ResourceId,
        id: FeatureValueId,
    ) -> Result<FeatureValue> {
        commands::feature_values::get_for_resource(&self.store, resource_id, id)
    }

    pub fn create_feature_value_for_resource(
        &self,
        resource_id: ResourceId,
        feature_id: FeatureId,
        slots: ValueSlots,
    ) -> Result<FeatureValue> {
        commands::feature_values::create_for_resource(
            &self.store,
            &self.enforcer,
            resource_id,
            feature_id,
            slots,
        )
    }

    pub fn update_feature_value_for_resource(
        &self,
        resource_id: ResourceId,
        id: FeatureValueId,
        slots: ValueSlots,
    ) -> Result<FeatureValue> {
        commands::feature_values::update_for_resource(
            &self.store,
            &self.enforcer,
            resource_id,
            id,
            slots,
        )
    }

    pub fn delete_feature_value_for_resource(
        &self,
        resource_id: ResourceId,
        id: FeatureValueId,
    ) -> Result<FeatureValue> {
        commands::feature_values::delete_for_resource(&self.store, resource_id, id)
    }

    // --- Maintenance ---

    /// The value types a feature can declare.
    pub fn value_types(&self) -> &'static [ValueType] {
        &ValueType::ALL
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats::from(&self.store.snapshot()?))
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        commands::doctor::run(&self.store, &self.enforcer)
    }

    pub fn seed_demo(&self) -> Result<CatalogStats> {
        commands::seed::seed_demo(&self.store, &self.enforcer)
    }

    pub fn seed_if_empty(&self) -> Result<Option<CatalogStats>> {
        commands::seed::seed_if_empty(&self.store, &self.enforcer)
    }
}
