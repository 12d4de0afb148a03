//! Category store.
//!
//! - `create`: new category from a validated name
//! - `get` / `list`: reads
//! - `update`: rename
//! - `delete`: remove the category and cascade to its features, resources
//!   and every value bound to them

use crate::error::{CatalogError, EntityKind, Result};
use crate::ids::CategoryId;
use crate::integrity::{Cascade, Enforcer};
use crate::model::Category;
use crate::store::DataStore;
use crate::validation::validate_name;
use tracing::{debug, info};

pub fn create<S: DataStore>(store: &S, name: &str) -> Result<Category> {
    validate_name(name)?;

    let category = Category {
        id: CategoryId::new(),
        name: name.to_string(),
    };
    store.transact(|tables| {
        tables.categories.insert(category.id, category.clone());
        Ok(())
    })?;

    info!(category = %category.id, name = %category.name, "Created category");
    Ok(category)
}

pub fn get<S: DataStore>(store: &S, id: CategoryId) -> Result<Category> {
    debug!(category = %id, "Fetching category");
    store
        .snapshot()?
        .categories
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Category, id))
}

/// All categories, ordered by name.
pub fn list<S: DataStore>(store: &S) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = store.snapshot()?.categories.into_values().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    Ok(categories)
}

pub fn update<S: DataStore>(store: &S, id: CategoryId, name: &str) -> Result<Category> {
    validate_name(name)?;

    let category = store.transact(|tables| {
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Category, id))?;
        category.name = name.to_string();
        Ok(category.clone())
    })?;

    info!(category = %id, name = %category.name, "Renamed category");
    Ok(category)
}

/// Delete a category and everything that depends on it.
///
/// Returns the full set of removed records. Nothing is removed if the
/// category does not exist or the commit fails.
pub fn delete<S: DataStore>(store: &S, enforcer: &Enforcer, id: CategoryId) -> Result<Cascade> {
    let cascade = store.transact(|tables| {
        if !tables.categories.contains_key(&id) {
            return Err(CatalogError::not_found(EntityKind::Category, id));
        }
        let cascade = enforcer.cascade_category(tables, id);
        cascade.apply(tables);
        Ok(cascade)
    })?;

    info!(
        category = %id,
        features = cascade.features.len(),
        resources = cascade.resources.len(),
        feature_values = cascade.feature_values.len(),
        "Deleted category"
    );
    Ok(cascade)
}
