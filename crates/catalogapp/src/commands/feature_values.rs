//! Feature value store.
//!
//! A feature value binds one resource to one feature and carries a single
//! [`Value`](crate::values::Value). Callers hand in [`ValueSlots`]; the
//! enforcer resolves them against the feature's declared type, so a stored
//! value always matches its feature.
//!
//! The full list is ordered by id. Per-resource lists are ordered by feature
//! name and per-feature lists by resource name, ties broken by id.
//!
//! The `*_for_resource` variants address a value through its resource: a
//! value bound to another resource is reported as not found, and the check
//! runs in the same transaction as the write it guards.

use crate::error::{CatalogError, EntityKind, Result};
use crate::ids::{FeatureId, FeatureValueId, ResourceId};
use crate::integrity::Enforcer;
use crate::model::{FeatureValue, FeatureValueDetail};
use crate::store::{DataStore, Tables};
use crate::values::ValueSlots;
use tracing::{debug, info};

pub fn create<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    resource_id: ResourceId,
    feature_id: FeatureId,
    slots: ValueSlots,
) -> Result<FeatureValue> {
    let feature_value = store.transact(|tables| {
        enforcer.require_resource(tables, resource_id)?;
        let feature = enforcer.require_feature(tables, feature_id)?;
        let value = enforcer.check_value(feature, slots)?;
        enforcer.check_binding(tables, resource_id, feature_id, None)?;

        let feature_value = FeatureValue {
            id: FeatureValueId::new(),
            resource_id,
            feature_id,
            value,
        };
        tables
            .feature_values
            .insert(feature_value.id, feature_value.clone());
        Ok(feature_value)
    })?;

    info!(
        feature_value = %feature_value.id,
        resource = %resource_id,
        feature = %feature_id,
        value_type = %feature_value.value.value_type(),
        "Created feature value"
    );
    Ok(feature_value)
}

pub fn get<S: DataStore>(store: &S, id: FeatureValueId) -> Result<FeatureValue> {
    debug!(feature_value = %id, "Fetching feature value");
    store
        .snapshot()?
        .feature_values
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))
}

pub fn list<S: DataStore>(store: &S) -> Result<Vec<FeatureValue>> {
    Ok(store.snapshot()?.feature_values.into_values().collect())
}

pub fn list_by_resource<S: DataStore>(
    store: &S,
    resource_id: ResourceId,
) -> Result<Vec<FeatureValue>> {
    let tables = store.snapshot()?;
    let mut values: Vec<FeatureValue> = tables.values_of_resource(resource_id).cloned().collect();
    values.sort_by_cached_key(|fv| {
        let name = tables.features.get(&fv.feature_id).map(|f| f.name.clone());
        (name, fv.id)
    });
    Ok(values)
}

pub fn list_by_feature<S: DataStore>(
    store: &S,
    feature_id: FeatureId,
) -> Result<Vec<FeatureValue>> {
    let tables = store.snapshot()?;
    let mut values: Vec<FeatureValue> = tables.values_of_feature(feature_id).cloned().collect();
    values.sort_by_cached_key(|fv| {
        let name = tables.resources.get(&fv.resource_id).map(|r| r.name.clone());
        (name, fv.id)
    });
    Ok(values)
}

/// Replace the value. The slots are checked against the feature the value
/// is bound to at the time of the update.
pub fn update<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    id: FeatureValueId,
    slots: ValueSlots,
) -> Result<FeatureValue> {
    let feature_value = store.transact(|tables| replace_value(tables, enforcer, id, slots))?;

    info!(feature_value = %id, "Updated feature value");
    Ok(feature_value)
}

pub fn delete<S: DataStore>(store: &S, id: FeatureValueId) -> Result<FeatureValue> {
    let removed = store.transact(|tables| {
        tables
            .feature_values
            .remove(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))
    })?;

    info!(feature_value = %id, "Deleted feature value");
    Ok(removed)
}

fn replace_value(
    tables: &mut Tables,
    enforcer: &Enforcer,
    id: FeatureValueId,
    slots: ValueSlots,
) -> Result<FeatureValue> {
    let feature_id = tables
        .feature_values
        .get(&id)
        .map(|fv| fv.feature_id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))?;
    let feature = enforcer.require_feature(tables, feature_id)?;
    let value = enforcer.check_value(feature, slots)?;

    let feature_value = tables
        .feature_values
        .get_mut(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))?;
    feature_value.value = value;
    Ok(feature_value.clone())
}

/// The value together with the resource and feature it binds.
pub fn get_detail<S: DataStore>(store: &S, id: FeatureValueId) -> Result<FeatureValueDetail> {
    let mut tables = store.snapshot()?;
    let feature_value = tables
        .feature_values
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))?;
    let resource = tables
        .resources
        .remove(&feature_value.resource_id)
        .ok_or_else(|| CatalogError::reference(EntityKind::Resource, feature_value.resource_id))?;
    let feature = tables
        .features
        .remove(&feature_value.feature_id)
        .ok_or_else(|| CatalogError::reference(EntityKind::Feature, feature_value.feature_id))?;

    Ok(FeatureValueDetail {
        feature_value,
        resource,
        feature,
    })
}

/// Fail with not-found unless `id` exists and is bound to `resource_id`.
fn require_owned(tables: &Tables, resource_id: ResourceId, id: FeatureValueId) -> Result<()> {
    let owner = tables
        .feature_values
        .get(&id)
        .map(|fv| fv.resource_id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))?;
    if owner != resource_id {
        debug!(
            feature_value = %id,
            resource = %resource_id,
            owner = %owner,
            "Feature value belongs to another resource"
        );
        return Err(CatalogError::not_found(EntityKind::FeatureValue, id));
    }
    Ok(())
}

/// Bind a new value to `resource_id`.
pub fn create_for_resource<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    resource_id: ResourceId,
    feature_id: FeatureId,
    slots: ValueSlots,
) -> Result<FeatureValue> {
    create(store, enforcer, resource_id, feature_id, slots)
}

/// Fetch a value through its resource.
pub fn get_for_resource<S: DataStore>(
    store: &S,
    resource_id: ResourceId,
    id: FeatureValueId,
) -> Result<FeatureValue> {
    let mut tables = store.snapshot()?;
    require_owned(&tables, resource_id, id)?;
    tables
        .feature_values
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))
}

pub fn update_for_resource<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    resource_id: ResourceId,
    id: FeatureValueId,
    slots: ValueSlots,
) -> Result<FeatureValue> {
    let feature_value = store.transact(|tables| {
        require_owned(tables, resource_id, id)?;
        replace_value(tables, enforcer, id, slots)
    })?;

    info!(feature_value = %id, resource = %resource_id, "Updated feature value");
    Ok(feature_value)
}

pub fn delete_for_resource<S: DataStore>(
    store: &S,
    resource_id: ResourceId,
    id: FeatureValueId,
) -> Result<FeatureValue> {
    let removed = store.transact(|tables| {
        require_owned(tables, resource_id, id)?;
        tables
            .feature_values
            .remove(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::FeatureValue, id))
    })?;

    info!(feature_value = %id, resource = %resource_id, "Deleted feature value");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{features, resources};
    use crate::error::ErrorKind;
    use crate::model::{NewFeature, NewResource};
    use crate::store::memory::fixtures::LabFixture;
    use crate::values::{Value, ValueType};

    fn number_feature(fx: &LabFixture) -> FeatureId {
        features::create(
            &fx.store,
            &Enforcer::new(),
            NewFeature::new("Bandwidth", ValueType::Number, fx.category),
        )
        .unwrap()
        .id
    }

    #[test]
    fn number_feature_rejects_string_slot() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let bandwidth = number_feature(&fx);

        let err = create(
            &fx.store,
            &enforcer,
            fx.resource,
            bandwidth,
            ValueSlots::string("100"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let created = create(
            &fx.store,
            &enforcer,
            fx.resource,
            bandwidth,
            ValueSlots::number(100.0),
        )
        .unwrap();
        assert_eq!(created.value, Value::Number(100.0));
        assert_eq!(list_by_feature(&fx.store, bandwidth).unwrap().len(), 1);
    }

    #[test]
    fn zero_or_multiple_slots_are_mismatches() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();

        let err = create(
            &fx.store,
            &enforcer,
            fx.resource,
            fx.feature,
            ValueSlots::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let both = ValueSlots {
            value_string: Some("5V".into()),
            value_boolean: Some(true),
            ..Default::default()
        };
        let err = create(&fx.store, &enforcer, fx.resource, fx.feature, both).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn boolean_value_reads_back_as_boolean() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let calibrated = features::create(
            &fx.store,
            &enforcer,
            NewFeature::new("Calibrated", ValueType::Boolean, fx.category),
        )
        .unwrap();

        let created = create(
            &fx.store,
            &enforcer,
            fx.resource,
            calibrated.id,
            ValueSlots::boolean(true),
        )
        .unwrap();

        let slots = get(&fx.store, created.id).unwrap().slots();
        assert_eq!(slots.value_boolean, Some(true));
        assert_eq!(slots.value_string, None);
        assert_eq!(slots.value_number, None);
    }

    #[test]
    fn create_checks_references() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();

        let err = create(
            &fx.store,
            &enforcer,
            ResourceId::new(),
            fx.feature,
            ValueSlots::string("1"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);

        let err = create(
            &fx.store,
            &enforcer,
            fx.resource,
            FeatureId::new(),
            ValueSlots::string("1"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(list(&fx.store).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_binding_depends_on_policy() {
        let fx = LabFixture::new();

        assert!(create(
            &fx.store,
            &Enforcer::new(),
            fx.resource,
            fx.feature,
            ValueSlots::string("110V"),
        )
        .is_ok());

        let strict = Enforcer::new().with_unique_bindings(true);
        let err = create(
            &fx.store,
            &strict,
            fx.resource,
            fx.feature,
            ValueSlots::string("12V"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(list_by_resource(&fx.store, fx.resource).unwrap().len(), 2);
    }

    #[test]
    fn update_replaces_value_with_type_check() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();

        let updated = update(&fx.store, &enforcer, fx.value, ValueSlots::string("110V")).unwrap();
        assert_eq!(updated.value.as_str(), Some("110V"));

        let err = update(&fx.store, &enforcer, fx.value, ValueSlots::number(110.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            get(&fx.store, fx.value).unwrap().value,
            Value::from("110V")
        );

        let err = update(
            &fx.store,
            &enforcer,
            FeatureValueId::new(),
            ValueSlots::string("x"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let fx = LabFixture::new();
        let removed = delete(&fx.store, fx.value).unwrap();
        assert_eq!(removed.id, fx.value);
        assert_eq!(get(&fx.store, fx.value).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(delete(&fx.store, fx.value).unwrap_err().kind(), ErrorKind::NotFound);
        // Parents are untouched
        assert!(resources::get(&fx.store, fx.resource).is_ok());
    }

    #[test]
    fn detail_joins_resource_and_feature() {
        let fx = LabFixture::new();
        let detail = get_detail(&fx.store, fx.value).unwrap();
        assert_eq!(detail.resource.name, "Meter");
        assert_eq!(detail.feature.name, "Voltage");
        assert_eq!(detail.feature_value.value, Value::from("220V"));
    }

    #[test]
    fn resource_scoped_read() {
        let fx = LabFixture::new();
        let other = resources::create(
            &fx.store,
            &Enforcer::new(),
            NewResource::new("Oscilloscope", 5, fx.category),
        )
        .unwrap();

        assert!(get_for_resource(&fx.store, fx.resource, fx.value).is_ok());
        let err = get_for_resource(&fx.store, other.id, fx.value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn resource_scoped_writes_check_ownership() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let other = resources::create(
            &fx.store,
            &enforcer,
            NewResource::new("Oscilloscope", 5, fx.category),
        )
        .unwrap();

        let err = update_for_resource(
            &fx.store,
            &enforcer,
            other.id,
            fx.value,
            ValueSlots::string("12V"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = delete_for_resource(&fx.store, other.id, fx.value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(get(&fx.store, fx.value).unwrap().value, Value::from("220V"));

        let updated = update_for_resource(
            &fx.store,
            &enforcer,
            fx.resource,
            fx.value,
            ValueSlots::string("110V"),
        )
        .unwrap();
        assert_eq!(updated.value.as_str(), Some("110V"));

        let err = update_for_resource(
            &fx.store,
            &enforcer,
            fx.resource,
            fx.value,
            ValueSlots::boolean(true),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let removed = delete_for_resource(&fx.store, fx.resource, fx.value).unwrap();
        assert_eq!(removed.id, fx.value);
        assert!(list_by_resource(&fx.store, fx.resource).unwrap().is_empty());
    }

    #[test]
    fn create_for_resource_binds_to_that_resource() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let created = create_for_resource(
            &fx.store,
            &enforcer,
            fx.resource,
            fx.feature,
            ValueSlots::string("12V"),
        )
        .unwrap();
        assert_eq!(created.resource_id, fx.resource);
        assert!(get_for_resource(&fx.store, fx.resource, created.id).is_ok());

        let err = create_for_resource(
            &fx.store,
            &enforcer,
            ResourceId::new(),
            fx.feature,
            ValueSlots::string("12V"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
    }

    #[test]
    fn resource_values_are_ordered_by_feature_name() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let amperage = features::create(
            &fx.store,
            &enforcer,
            NewFeature::new("Amperage", ValueType::String, fx.category),
        )
        .unwrap();
        create(
            &fx.store,
            &enforcer,
            fx.resource,
            amperage.id,
            ValueSlots::string("2A"),
        )
        .unwrap();

        let names: Vec<_> = list_by_resource(&fx.store, fx.resource)
            .unwrap()
            .into_iter()
            .map(|fv| fv.value.as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec![Some("2A".to_string()), Some("220V".to_string())]);
    }
}
