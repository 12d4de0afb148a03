//! Feature store.
//!
//! Features are typed attribute definitions scoped to a category. The
//! declared type is fixed at creation; see [`Enforcer::check_type_change`].
//!
//! `list_by_category` does not check that the category exists: an unknown
//! category simply has no features.

use crate::error::{CatalogError, EntityKind, Result};
use crate::ids::{CategoryId, FeatureId};
use crate::integrity::{Cascade, Enforcer};
use crate::model::{Feature, FeatureUpdate, NewFeature};
use crate::store::DataStore;
use crate::validation::validate_name;
use tracing::{debug, info};

pub fn create<S: DataStore>(store: &S, enforcer: &Enforcer, input: NewFeature) -> Result<Feature> {
    validate_name(&input.name)?;

    let feature = store.transact(|tables| {
        enforcer.require_category(tables, input.category_id)?;

        let feature = Feature {
            id: FeatureId::new(),
            name: input.name,
            value_type: input.value_type,
            category_id: input.category_id,
        };
        tables.features.insert(feature.id, feature.clone());
        Ok(feature)
    })?;

    info!(
        feature = %feature.id,
        category = %feature.category_id,
        value_type = %feature.value_type,
        "Created feature"
    );
    Ok(feature)
}

pub fn get<S: DataStore>(store: &S, id: FeatureId) -> Result<Feature> {
    debug!(feature = %id, "Fetching feature");
    store
        .snapshot()?
        .features
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Feature, id))
}

/// All features, ordered by name.
pub fn list<S: DataStore>(store: &S) -> Result<Vec<Feature>> {
    let mut features: Vec<Feature> = store.snapshot()?.features.into_values().collect();
    sort_by_name(&mut features);
    Ok(features)
}

pub fn list_by_category<S: DataStore>(store: &S, category_id: CategoryId) -> Result<Vec<Feature>> {
    let tables = store.snapshot()?;
    let mut features: Vec<Feature> = tables.features_in(category_id).cloned().collect();
    sort_by_name(&mut features);
    Ok(features)
}

pub fn update<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    id: FeatureId,
    patch: FeatureUpdate,
) -> Result<Feature> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }

    let feature = store.transact(|tables| {
        let current = tables
            .features
            .get(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Feature, id))?;

        if let Some(value_type) = patch.value_type {
            enforcer.check_type_change(current, value_type)?;
        }
        if let Some(category_id) = patch.category_id {
            enforcer.require_category(tables, category_id)?;
        }

        let mut feature = current.clone();
        if let Some(name) = patch.name {
            feature.name = name;
        }
        if let Some(category_id) = patch.category_id {
            feature.category_id = category_id;
        }
        tables.features.insert(id, feature.clone());
        Ok(feature)
    })?;

    info!(feature = %id, "Updated feature");
    Ok(feature)
}

/// Delete a feature and every value bound to it.
pub fn delete<S: DataStore>(store: &S, enforcer: &Enforcer, id: FeatureId) -> Result<Cascade> {
    let cascade = store.transact(|tables| {
        if !tables.features.contains_key(&id) {
            return Err(CatalogError::not_found(EntityKind::Feature, id));
        }
        let cascade = enforcer.cascade_feature(tables, id);
        cascade.apply(tables);
        Ok(cascade)
    })?;

    info!(
        feature = %id,
        feature_values = cascade.feature_values.len(),
        "Deleted feature"
    );
    Ok(cascade)
}

fn sort_by_name(features: &mut [Feature]) {
    features.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::categories;
    use crate::error::ErrorKind;
    use crate::store::memory::fixtures::LabFixture;
    use crate::store::memory::InMemoryStore;
    use crate::values::ValueType;

    #[test]
    fn create_requires_existing_category() {
        let store = InMemoryStore::new();
        let enforcer = Enforcer::new();

        let err = create(
            &store,
            &enforcer,
            NewFeature::new("Voltage", ValueType::String, CategoryId::new()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(list(&store).unwrap().is_empty());
    }

    #[test]
    fn create_and_list_by_category() {
        let store = InMemoryStore::new();
        let enforcer = Enforcer::new();
        let lab = categories::create(&store, "Lab").unwrap();
        let other = categories::create(&store, "Other").unwrap();

        create(
            &store,
            &enforcer,
            NewFeature::new("Voltage", ValueType::String, lab.id),
        )
        .unwrap();
        create(
            &store,
            &enforcer,
            NewFeature::new("Calibrated", ValueType::Boolean, lab.id),
        )
        .unwrap();

        let names: Vec<_> = list_by_category(&store, lab.id)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Calibrated", "Voltage"]);
        assert!(list_by_category(&store, other.id).unwrap().is_empty());
    }

    #[test]
    fn list_by_unknown_category_is_empty_not_error() {
        let store = InMemoryStore::new();
        assert!(list_by_category(&store, CategoryId::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn create_rejects_bad_name() {
        let fx = LabFixture::new();
        let err = create(
            &fx.store,
            &Enforcer::new(),
            NewFeature::new("", ValueType::Number, fx.category),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn update_name_and_category() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();
        let other = categories::create(&fx.store, "Other").unwrap();

        let updated = update(
            &fx.store,
            &enforcer,
            fx.feature,
            FeatureUpdate {
                name: Some("Mains Voltage".into()),
                category_id: Some(other.id),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.name, "Mains Voltage");
        assert_eq!(updated.category_id, other.id);
        assert_eq!(updated.value_type, ValueType::String);
    }

    #[test]
    fn update_rejects_type_change_and_unknown_category() {
        let fx = LabFixture::new();
        let enforcer = Enforcer::new();

        let err = update(
            &fx.store,
            &enforcer,
            fx.feature,
            FeatureUpdate {
                value_type: Some(ValueType::Number),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = update(
            &fx.store,
            &enforcer,
            fx.feature,
            FeatureUpdate {
                name: Some("Renamed".into()),
                category_id: Some(CategoryId::new()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);

        // Neither failed update left a trace
        assert_eq!(get(&fx.store, fx.feature).unwrap().name, "Voltage");
    }

    #[test]
    fn same_type_in_update_is_allowed() {
        let fx = LabFixture::new();
        let updated = update(
            &fx.store,
            &Enforcer::new(),
            fx.feature,
            FeatureUpdate {
                value_type: Some(ValueType::String),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.value_type, ValueType::String);
    }

    #[test]
    fn delete_cascades_to_values_only() {
        let fx = LabFixture::new();
        let cascade = delete(&fx.store, &Enforcer::new(), fx.feature).unwrap();
        assert!(cascade.feature_values.contains(&fx.value));

        let tables = fx.store.snapshot().unwrap();
        assert!(tables.feature_values.is_empty());
        assert!(tables.resources.contains_key(&fx.resource));
        assert_eq!(
            get(&fx.store, fx.feature).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
