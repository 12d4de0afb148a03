//! Consistency repair.
//!
//! The stores never write an inconsistent catalog, but a snapshot file can
//! be edited by hand or produced by another tool. `run` scans the current
//! snapshot and, in one transaction, removes:
//!
//! - features and resources whose category is missing (and their values)
//! - values whose resource or feature is missing
//! - values whose kind disagrees with their feature's declared type, or
//!   that fail value validation
//!
//! A clean catalog is left untouched and nothing is written.

use crate::error::Result;
use crate::ids::FeatureValueId;
use crate::integrity::{Cascade, Enforcer};
use crate::store::{DataStore, Tables};
use serde::Serialize;
use tracing::{info, warn};

/// Report from the `doctor` operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub orphan_features: usize,
    pub orphan_resources: usize,
    pub dangling_values: usize,
    pub mistyped_values: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.orphan_features + self.orphan_resources + self.dangling_values + self.mistyped_values
    }
}

pub fn run<S: DataStore>(store: &S, enforcer: &Enforcer) -> Result<DoctorReport> {
    if diagnose(&store.snapshot()?, enforcer).0.is_clean() {
        info!("No inconsistencies found");
        return Ok(DoctorReport::default());
    }

    let report = store.transact(|tables| {
        let (report, cascade) = diagnose(tables, enforcer);
        cascade.apply(tables);
        Ok(report)
    })?;

    warn!(
        orphan_features = report.orphan_features,
        orphan_resources = report.orphan_resources,
        dangling_values = report.dangling_values,
        mistyped_values = report.mistyped_values,
        "Repaired catalog inconsistencies"
    );
    Ok(report)
}

/// Work out what has to go, without touching `tables`.
fn diagnose(tables: &Tables, enforcer: &Enforcer) -> (DoctorReport, Cascade) {
    let mut report = DoctorReport::default();
    let mut removal = Cascade::default();

    for feature in tables.features.values() {
        if !tables.categories.contains_key(&feature.category_id) {
            report.orphan_features += 1;
            merge(&mut removal, enforcer.cascade_feature(tables, feature.id));
        }
    }
    for resource in tables.resources.values() {
        if !tables.categories.contains_key(&resource.category_id) {
            report.orphan_resources += 1;
            merge(&mut removal, enforcer.cascade_resource(tables, resource.id));
        }
    }

    let already_removed = |id: &FeatureValueId| removal.feature_values.contains(id);
    let mut extra = Vec::new();
    for value in tables.feature_values.values() {
        if already_removed(&value.id) {
            continue;
        }
        let feature = tables.features.get(&value.feature_id);
        if feature.is_none() || !tables.resources.contains_key(&value.resource_id) {
            report.dangling_values += 1;
            extra.push(value.id);
            continue;
        }
        let mistyped = feature
            .map(|f| enforcer.check_value(f, value.slots()).is_err())
            .unwrap_or(false);
        if mistyped {
            report.mistyped_values += 1;
            extra.push(value.id);
        }
    }
    removal.feature_values.extend(extra);

    (report, removal)
}

fn merge(into: &mut Cascade, other: Cascade) {
    into.categories.extend(other.categories);
    into.features.extend(other.features);
    into.resources.extend(other.resources);
    into.feature_values.extend(other.feature_values);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CategoryId, FeatureId, ResourceId};
    use crate::model::{Category, Feature, FeatureValue};
    use crate::store::catalog_store::CatalogStore;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::fixtures::LabFixture;
    use crate::values::{Value, ValueType};

    #[test]
    fn clean_catalog_reports_nothing() {
        let fx = LabFixture::new();
        let report = run(&fx.store, &Enforcer::new()).unwrap();
        assert!(report.is_clean());
        assert_eq!(fx.store.snapshot().unwrap().feature_values.len(), 1);
    }

    #[test]
    fn removes_mistyped_and_dangling_values() {
        let fx = LabFixture::new();
        fx.store
            .transact(|tables| {
                // Voltage is STRING; a number does not belong here
                let mistyped = FeatureValue {
                    id: FeatureValueId::new(),
                    resource_id: fx.resource,
                    feature_id: fx.feature,
                    value: Value::Number(5.0),
                };
                let dangling = FeatureValue {
                    id: FeatureValueId::new(),
                    resource_id: ResourceId::new(),
                    feature_id: fx.feature,
                    value: Value::from("12V"),
                };
                tables.feature_values.insert(mistyped.id, mistyped);
                tables.feature_values.insert(dangling.id, dangling);
                Ok(())
            })
            .unwrap();

        let report = run(&fx.store, &Enforcer::new()).unwrap();
        assert_eq!(report.mistyped_values, 1);
        assert_eq!(report.dangling_values, 1);
        assert_eq!(report.total(), 2);

        let tables = fx.store.snapshot().unwrap();
        assert_eq!(tables.feature_values.len(), 1);
        assert!(tables.feature_values.contains_key(&fx.value));
    }

    #[test]
    fn removes_orphaned_features_with_their_values() {
        let fx = LabFixture::new();
        fx.store
            .transact(|tables| {
                // Drop the category without cascading
                tables.categories.remove(&fx.category);
                Ok(())
            })
            .unwrap();

        let report = run(&fx.store, &Enforcer::new()).unwrap();
        assert_eq!(report.orphan_features, 1);
        assert_eq!(report.orphan_resources, 1);
        // The value went with its feature, so it is not counted again
        assert_eq!(report.dangling_values, 0);
        assert!(fx.store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn second_run_is_clean() {
        let category = CategoryId::new();
        let ghost = Feature {
            id: FeatureId::new(),
            name: "Ghost".into(),
            value_type: ValueType::Boolean,
            category_id: CategoryId::new(),
        };
        let mut tables = Tables::default();
        tables.categories.insert(
            category,
            Category {
                id: category,
                name: "Lab".into(),
            },
        );
        tables.features.insert(ghost.id, ghost);
        let store = CatalogStore::with_backend(MemBackend::with_tables(tables));

        let enforcer = Enforcer::new();
        assert_eq!(run(&store, &enforcer).unwrap().orphan_features, 1);
        assert!(run(&store, &enforcer).unwrap().is_clean());
        assert_eq!(store.snapshot().unwrap().categories.len(), 1);
    }
}
