//! Resource store.
//!
//! Resources are inventory items: a name, a non-negative quantity, an
//! active/inactive status and the category they belong to.

use crate::error::{CatalogError, EntityKind, Result};
use crate::ids::{CategoryId, ResourceId};
use crate::integrity::{Cascade, Enforcer};
use crate::model::{NewResource, Resource, ResourceUpdate};
use crate::store::DataStore;
use crate::validation::{validate_name, validate_quantity};
use tracing::{debug, info};

pub fn create<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    input: NewResource,
) -> Result<Resource> {
    validate_name(&input.name)?;
    let quantity = validate_quantity(input.quantity)?;

    let resource = store.transact(|tables| {
        enforcer.require_category(tables, input.category_id)?;

        let resource = Resource {
            id: ResourceId::new(),
            name: input.name,
            quantity,
            status: input.status,
            category_id: input.category_id,
        };
        tables.resources.insert(resource.id, resource.clone());
        Ok(resource)
    })?;

    info!(
        resource = %resource.id,
        category = %resource.category_id,
        quantity = resource.quantity,
        "Created resource"
    );
    Ok(resource)
}

pub fn get<S: DataStore>(store: &S, id: ResourceId) -> Result<Resource> {
    debug!(resource = %id, "Fetching resource");
    store
        .snapshot()?
        .resources
        .remove(&id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Resource, id))
}

/// All resources, ordered by name.
pub fn list<S: DataStore>(store: &S) -> Result<Vec<Resource>> {
    let mut resources: Vec<Resource> = store.snapshot()?.resources.into_values().collect();
    sort_by_name(&mut resources);
    Ok(resources)
}

/// Resources of one category. An unknown category yields an empty list.
pub fn list_by_category<S: DataStore>(
    store: &S,
    category_id: CategoryId,
) -> Result<Vec<Resource>> {
    let tables = store.snapshot()?;
    let mut resources: Vec<Resource> = tables.resources_in(category_id).cloned().collect();
    sort_by_name(&mut resources);
    Ok(resources)
}

pub fn update<S: DataStore>(
    store: &S,
    enforcer: &Enforcer,
    id: ResourceId,
    patch: ResourceUpdate,
) -> Result<Resource> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    let quantity = patch.quantity.map(validate_quantity).transpose()?;

    let resource = store.transact(|tables| {
        if !tables.resources.contains_key(&id) {
            return Err(CatalogError::not_found(EntityKind::Resource, id));
        }
        if let Some(category_id) = patch.category_id {
            enforcer.require_category(tables, category_id)?;
        }

        let resource = tables
            .resources
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Resource, id))?;
        if let Some(name) = patch.name {
            resource.name = name;
        }
        if let Some(quantity) = quantity {
            resource.quantity = quantity;
        }
        if let Some(status) = patch.status {
            resource.status = status;
        }
        if let Some(category_id) = patch.category_id {
            resource.category_id = category_id;
        }
        Ok(resource.clone())
    })?;

    info!(resource = %id, "Updated resource");
    Ok(resource)
}

/// Delete a resource and every value bound to it.
pub fn delete<S: DataStore>(store: &S, enforcer: &Enforcer, id: ResourceId) -> Result<Cascade> {
    let cascade = store.transact(|tables| {
        if !tables.resources.contains_key(&id) {
            return Err(CatalogError::not_found(EntityKind::Resource, id));
        }
        let cascade = enforcer.cascade_resource(tables, id);
        cascade.apply(tables);
        Ok(cascade)
    })?;

    info!(
        resource = %id,
        feature_values = cascade.feature_values.len(),
        "Deleted resource"
    );
    Ok(cascade)
}

fn sort_by_name(resources: &mut [Resource]) {
    resources.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}
