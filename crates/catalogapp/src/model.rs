//! # Domain Model
//!
//! Four entities, all related by identifier, never by ownership of values:
//!
//! ```text
//! Category ──┬── Feature ──┐
//!            │             ├── FeatureValue
//!            └── Resource ─┘
//! ```
//!
//! - [`Category`] scopes a set of features and a set of resources.
//! - [`Feature`] is a typed attribute definition within a category.
//! - [`Resource`] is an inventory item within a category.
//! - [`FeatureValue`] binds one resource and one feature to one [`Value`].
//!
//! A feature value's resource and feature need not share a category.
//!
//! The `New*` and `*Update` structs are the plain-data inputs accepted by the
//! stores. Update structs are partial: `None` leaves the field unchanged.

use crate::ids::{CategoryId, FeatureId, FeatureValueId, ResourceId};
use crate::values::{Value, ValueSlots, ValueType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    /// Declared type; fixed once the feature exists
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub quantity: u64,
    /// Active (`true`) or inactive
    pub status: bool,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureValue {
    pub id: FeatureValueId,
    pub resource_id: ResourceId,
    pub feature_id: FeatureId,
    pub value: Value,
}

impl FeatureValue {
    /// The value spread over the three boundary slots.
    pub fn slots(&self) -> ValueSlots {
        self.value.to_slots()
    }

    /// Flat, three-slot representation for callers that expect
    /// `valueString` / `valueNumber` / `valueBoolean`.
    pub fn view(&self) -> FeatureValueView {
        FeatureValueView {
            id: self.id,
            resource_id: self.resource_id,
            feature_id: self.feature_id,
            slots: self.slots(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureValueView {
    pub id: FeatureValueId,
    pub resource_id: ResourceId,
    pub feature_id: FeatureId,
    #[serde(flatten)]
    pub slots: ValueSlots,
}

/// A feature value together with the entities it binds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureValueDetail {
    pub feature_value: FeatureValue,
    pub resource: Resource,
    pub feature: Feature,
}

// --- Inputs ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeature {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub category_id: CategoryId,
}

impl NewFeature {
    pub fn new(name: impl Into<String>, value_type: ValueType, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            value_type,
            category_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub value_type: Option<ValueType>,
    pub category_id: Option<CategoryId>,
}

fn default_status() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub name: String,
    /// Signed so that negative input can be reported instead of wrapping
    pub quantity: i64,
    #[serde(default = "default_status")]
    pub status: bool,
    pub category_id: CategoryId,
}

impl NewResource {
    /// A new active resource.
    pub fn new(name: impl Into<String>, quantity: i64, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            quantity,
            status: true,
            category_id,
        }
    }

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub status: Option<bool>,
    pub category_id: Option<CategoryId>,
}
