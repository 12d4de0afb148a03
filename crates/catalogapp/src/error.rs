use crate::values::ValueType;
use std::fmt;
use thiserror::Error;

/// The four entity collections of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Feature,
    Resource,
    FeatureValue,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Category => "Category",
            EntityKind::Feature => "Feature",
            EntityKind::Resource => "Resource",
            EntityKind::FeatureValue => "FeatureValue",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("Reference error: {entity} with ID {id} does not exist")]
    Reference { entity: EntityKind, id: String },

    #[error("Type mismatch: feature {feature} expects a {expected} value, got {found}")]
    TypeMismatch {
        feature: String,
        expected: ValueType,
        found: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`CatalogError`].
///
/// I/O and serialization failures both come from the backend and are
/// reported as [`ErrorKind::Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Reference,
    NotFound,
    TypeMismatch,
    Storage,
}

impl CatalogError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn reference(entity: EntityKind, id: impl ToString) -> Self {
        CatalogError::Reference {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::Reference { .. } => ErrorKind::Reference,
            CatalogError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CatalogError::Storage(_) | CatalogError::Io(_) | CatalogError::Serialization(_) => {
                ErrorKind::Storage
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
