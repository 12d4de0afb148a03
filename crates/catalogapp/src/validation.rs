//! Field validation for catalog entities.
//!
//! Names (categories, features, resources):
//! - Must contain at least one non-whitespace character
//! - At most 255 characters (counted as Unicode scalar values, not bytes)
//!
//! Resource quantities must be zero or greater.

use crate::error::CatalogError;

/// Longest accepted entity name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Validates an entity name.
///
/// # Examples
/// ```
/// use catalogapp::validation::validate_name;
///
/// assert!(validate_name("Electronics").is_ok());
/// assert!(validate_name(&"x".repeat(255)).is_ok());
///
/// assert!(validate_name("").is_err());
/// assert!(validate_name("   ").is_err());
/// assert!(validate_name(&"x".repeat(256)).is_err());
/// ```
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Empty);
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(NameValidationError::TooLong(len));
    }

    Ok(())
}

/// Validates a resource quantity, returning it as an unsigned count.
pub fn validate_quantity(quantity: i64) -> Result<u64, CatalogError> {
    u64::try_from(quantity).map_err(|_| {
        CatalogError::Validation(format!(
            "Quantity must be zero or greater, got {}",
            quantity
        ))
    })
}

/// Error type for name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    /// Name is empty or whitespace only
    Empty,
    /// Name exceeds [`MAX_NAME_LEN`]; carries the actual length
    TooLong(usize),
}

impl std::fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameValidationError::Empty => write!(f, "Name cannot be empty"),
            NameValidationError::TooLong(len) => write!(
                f,
                "Name must be at most {} characters, got {}",
                MAX_NAME_LEN, len
            ),
        }
    }
}

impl std::error::Error for NameValidationError {}

impl From<NameValidationError> for CatalogError {
    fn from(err: NameValidationError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}
