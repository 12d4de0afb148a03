//! Declared value types.
//!
//! A feature's [`ValueType`] is the contract every value bound to it must
//! honor. The set is closed: string, number and boolean scalars only.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of scalar a feature holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// Free text, at most [`crate::values::MAX_STRING_VALUE_LEN`] characters
    String,
    /// Finite floating point number
    Number,
    /// True or false
    Boolean,
}

impl ValueType {
    /// Every declared type, in display order.
    pub const ALL: [ValueType; 3] = [ValueType::String, ValueType::Number, ValueType::Boolean];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "STRING",
            ValueType::Number => "NUMBER",
            ValueType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CatalogError;

    /// Case-insensitive; anything outside the enumeration is a validation error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CatalogError::Validation(format!(
                    "Unknown value type '{}' (expected one of STRING, NUMBER, BOOLEAN)",
                    s
                ))
            })
    }
}
