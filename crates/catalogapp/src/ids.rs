//! # Identifier Space
//!
//! Every entity is addressed by an opaque identifier. Internally these are v4
//! UUIDs; externally they travel as their hyphenated string form. Only
//! uniqueness and stability matter, never the format.
//!
//! Each collection gets its own newtype so a [`ResourceId`] can never be
//! handed to an operation expecting a [`FeatureId`]. All four share the same
//! behavior, generated by `entity_id!`.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self> {
                Uuid::parse_str(s.trim()).map(Self).map_err(|_| {
                    CatalogError::Validation(format!("Invalid {} ID format: {}", $label, s))
                })
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::model::Category`].
    CategoryId,
    "category"
);
entity_id!(
    /// Identifier of a [`crate::model::Feature`].
    FeatureId,
    "feature"
);
entity_id!(
    /// Identifier of a [`crate::model::Resource`].
    ResourceId,
    "resource"
);
entity_id!(
    /// Identifier of a [`crate::model::FeatureValue`].
    FeatureValueId,
    "feature value"
);
