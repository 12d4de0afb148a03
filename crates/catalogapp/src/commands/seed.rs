//! Demo data.
//!
//! Three equipment categories, each with three features and a handful of
//! resources carrying one value per feature. The whole data set goes in as
//! a single transaction and every value passes the enforcer's type check.

use crate::error::Result;
use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
use crate::integrity::Enforcer;
use crate::model::{Category, Feature, FeatureValue, Resource};
use crate::store::{CatalogStats, DataStore, Tables};
use crate::values::{ValueSlots, ValueType};
use tracing::info;
use Demo::{Flag, Text};

#[derive(Clone, Copy)]
enum Demo {
    Text(&'static str),
    Flag(bool),
}

impl Demo {
    fn slots(self) -> ValueSlots {
        match self {
            Demo::Text(s) => ValueSlots::string(s),
            Demo::Flag(b) => ValueSlots::boolean(b),
        }
    }
}

struct DemoResource {
    name: &'static str,
    quantity: u64,
    status: bool,
    values: [Demo; 3],
}

struct DemoCategory {
    name: &'static str,
    features: [(&'static str, ValueType); 3],
    resources: &'static [DemoResource],
}

const fn res(name: &'static str, quantity: u64, status: bool, values: [Demo; 3]) -> DemoResource {
    DemoResource {
        name,
        quantity,
        status,
        values,
    }
}

#[rustfmt::skip]
const DEMO: &[DemoCategory] = &[
    DemoCategory {
        name: "Audiovisual Equipment",
        features: [
            ("Resolution", ValueType::String),
            ("Connectivity", ValueType::String),
            ("Portable", ValueType::Boolean),
        ],
        resources: &[
            res("Epson PowerLite Projector", 12, true, [Text("1920x1080 Full HD"), Text("HDMI, VGA, USB"), Flag(true)]),
            res("Shure Wireless Microphone", 8, true, [Text("N/A"), Text("Wireless 2.4GHz"), Flag(true)]),
            res("Powered Speaker", 6, true, [Text("N/A"), Text("Bluetooth, AUX, USB"), Flag(true)]),
            res("Sony 4K Video Camera", 4, true, [Text("3840x2160 4K UHD"), Text("HDMI, USB-C, Wi-Fi"), Flag(true)]),
        ],
    },
    DemoCategory {
        name: "Computing Equipment",
        features: [
            ("Processor", ValueType::String),
            ("RAM", ValueType::String),
            ("Storage", ValueType::String),
        ],
        resources: &[
            res("Dell Inspiron Laptop", 20, true, [Text("Intel Core i5 11th gen"), Text("8GB DDR4"), Text("256GB SSD")]),
            res("Samsung Galaxy Tab", 15, true, [Text("Snapdragon 865"), Text("6GB"), Text("128GB")]),
            res("HDMI/VGA Adapter", 25, true, [Text("N/A"), Text("N/A"), Text("N/A")]),
        ],
    },
    DemoCategory {
        name: "Laboratory Equipment",
        features: [
            ("Capacity", ValueType::String),
            ("Voltage", ValueType::String),
            ("Calibrated", ValueType::Boolean),
        ],
        resources: &[
            res("Digital Oscilloscope", 5, true, [Text("100 MHz, 4 channels"), Text("110V/220V"), Flag(true)]),
            res("Fluke Digital Multimeter", 10, true, [Text("1000V, 10A"), Text("9V battery"), Flag(true)]),
            res("DC Power Supply", 8, false, [Text("0-30V, 0-5A"), Text("110V/220V"), Flag(false)]),
        ],
    },
];

/// Add the demo data set to the catalog, whatever it already holds.
/// Returns the number of records added.
pub fn seed_demo<S: DataStore>(store: &S, enforcer: &Enforcer) -> Result<CatalogStats> {
    let stats = store.transact(|tables| insert_demo(tables, enforcer))?;
    info!(
        categories = stats.categories,
        features = stats.features,
        resources = stats.resources,
        feature_values = stats.feature_values,
        "Seeded demo catalog"
    );
    Ok(stats)
}

/// Seed only an empty catalog. Returns `None` when data was already present.
pub fn seed_if_empty<S: DataStore>(store: &S, enforcer: &Enforcer) -> Result<Option<CatalogStats>> {
    let stats = store.transact(|tables| {
        if !tables.is_empty() {
            return Ok(None);
        }
        insert_demo(tables, enforcer).map(Some)
    })?;

    match stats {
        Some(stats) => info!(
            categories = stats.categories,
            resources = stats.resources,
            "Seeded empty catalog"
        ),
        None => info!("Catalog already has data, skipping seed"),
    }
    Ok(stats)
}

fn insert_demo(tables: &mut Tables, enforcer: &Enforcer) -> Result<CatalogStats> {
    let mut added = CatalogStats::default();

    for demo in DEMO {
        let category = Category {
            id: CategoryId::new(),
            name: demo.name.to_string(),
        };

        let mut features = Vec::with_capacity(demo.features.len());
        for (name, value_type) in demo.features {
            features.push(Feature {
                id: FeatureId::new(),
                name: name.to_string(),
                value_type,
                category_id: category.id,
            });
        }

        let mut resources = Vec::with_capacity(demo.resources.len());
        for item in demo.resources {
            let resource = Resource {
                id: ResourceId::new(),
                name: item.name.to_string(),
                quantity: item.quantity,
                status: item.status,
                category_id: category.id,
            };

            for (feature, demo_value) in features.iter().zip(item.values) {
                let value = enforcer.check_value(feature, demo_value.slots())?;
                let fv = FeatureValue {
                    id: FeatureValueId::new(),
                    resource_id: resource.id,
                    feature_id: feature.id,
                    value,
                };
                tables.feature_values.insert(fv.id, fv);
                added.feature_values += 1;
            }
            resources.push(resource);
        }

        added.categories += 1;
        added.features += features.len();
        added.resources += resources.len();

        tables.categories.insert(category.id, category);
        tables.features.extend(features.into_iter().map(|f| (f.id, f)));
        tables
            .resources
            .extend(resources.into_iter().map(|r| (r.id, r)));
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{feature_values, resources};
    use crate::store::memory::fixtures::LabFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn seed_demo_populates_catalog() {
        let store = InMemoryStore::new();
        let added = seed_demo(&store, &Enforcer::new()).unwrap();

        assert_eq!(added.categories, 3);
        assert_eq!(added.features, 9);
        assert_eq!(added.resources, 10);
        assert_eq!(added.feature_values, 30);
        assert_eq!(CatalogStats::from(&store.snapshot().unwrap()), added);
    }

    #[test]
    fn seeded_values_match_their_features() {
        let store = InMemoryStore::new();
        seed_demo(&store, &Enforcer::new()).unwrap();
        let tables = store.snapshot().unwrap();

        for fv in feature_values::list(&store).unwrap() {
            let feature = &tables.features[&fv.feature_id];
            assert_eq!(fv.value.value_type(), feature.value_type);
        }

        let supply = resources::list(&store)
            .unwrap()
            .into_iter()
            .find(|r| r.name == "DC Power Supply")
            .unwrap();
        assert!(!supply.status);
        assert_eq!(supply.quantity, 8);
    }

    #[test]
    fn seed_if_empty_skips_populated_catalog() {
        let fx = LabFixture::new();
        assert_eq!(seed_if_empty(&fx.store, &Enforcer::new()).unwrap(), None);
        assert_eq!(fx.store.snapshot().unwrap().categories.len(), 1);

        let store = InMemoryStore::new();
        let first = seed_if_empty(&store, &Enforcer::new()).unwrap();
        assert!(first.is_some());
        assert_eq!(seed_if_empty(&store, &Enforcer::new()).unwrap(), None);
    }
}
