use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatalogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
    use crate::model::{Category, Feature, FeatureValue, Resource};
    use crate::store::DataStore;
    use crate::values::{Value, ValueType};

    /// The "Lab" catalog: one category with a STRING feature "Voltage",
    /// a resource "Meter" and a value binding the two.
    pub struct LabFixture {
        pub store: InMemoryStore,
        pub category: CategoryId,
        pub feature: FeatureId,
        pub resource: ResourceId,
        pub value: FeatureValueId,
    }

    impl Default for LabFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LabFixture {
        pub fn new() -> Self {
            let store = InMemoryStore::new();
            let category = CategoryId::new();
            let feature = FeatureId::new();
            let resource = ResourceId::new();
            let value = FeatureValueId::new();

            store
                .transact(|tables| {
                    tables.categories.insert(
                        category,
                        Category {
                            id: category,
                            name: "Lab".into(),
                        },
                    );
                    tables.features.insert(
                        feature,
                        Feature {
                            id: feature,
                            name: "Voltage".into(),
                            value_type: ValueType::String,
                            category_id: category,
                        },
                    );
                    tables.resources.insert(
                        resource,
                        Resource {
                            id: resource,
                            name: "Meter".into(),
                            quantity: 3,
                            status: true,
                            category_id: category,
                        },
                    );
                    tables.feature_values.insert(
                        value,
                        FeatureValue {
                            id: value,
                            resource_id: resource,
                            feature_id: feature,
                            value: Value::from("220V"),
                        },
                    );
                    Ok(())
                })
                .expect("in-memory fixture cannot fail");

            Self {
                store,
                category,
                feature,
                resource,
                value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::LabFixture;
    use crate::store::DataStore;

    #[test]
    fn lab_fixture_is_consistent() {
        let fx = LabFixture::new();
        let tables = fx.store.snapshot().unwrap();
        assert_eq!(tables.features[&fx.feature].category_id, fx.category);
        assert_eq!(tables.resources[&fx.resource].category_id, fx.category);
        assert_eq!(tables.feature_values[&fx.value].feature_id, fx.feature);
    }
}
