//! Scalar values and their three-slot boundary shape.
//!
//! Inside the catalog a value is a single tagged [`Value`]: it is impossible
//! to represent "no value" or "two values". Callers at the edge often speak in
//! three optional slots (`valueString`, `valueNumber`, `valueBoolean`);
//! [`ValueSlots`] is that shape, and [`ValueSlots::resolve`] is the only way
//! from it to a [`Value`].

use super::{ValueType, MAX_STRING_VALUE_LEN};
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// A typed scalar bound to a resource/feature pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check the limits that hold regardless of the feature: string length
    /// and finiteness of numbers.
    pub fn validate(&self) -> Result<()> {
        match self {
            Value::String(s) if s.chars().count() > MAX_STRING_VALUE_LEN => {
                Err(CatalogError::Validation(format!(
                    "String value must be at most {} characters",
                    MAX_STRING_VALUE_LEN
                )))
            }
            Value::Number(n) if !n.is_finite() => Err(CatalogError::Validation(
                "Number value must be finite".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Spread the value back into the three-slot shape.
    pub fn to_slots(&self) -> ValueSlots {
        match self {
            Value::String(s) => ValueSlots::string(s.clone()),
            Value::Number(n) => ValueSlots::number(*n),
            Value::Boolean(b) => ValueSlots::boolean(*b),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Three independently optional slots, as external callers send them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
}

impl ValueSlots {
    pub fn string(s: impl Into<String>) -> Self {
        Self {
            value_string: Some(s.into()),
            ..Default::default()
        }
    }

    pub fn number(n: f64) -> Self {
        Self {
            value_number: Some(n),
            ..Default::default()
        }
    }

    pub fn boolean(b: bool) -> Self {
        Self {
            value_boolean: Some(b),
            ..Default::default()
        }
    }

    /// Types of the slots that are populated, in slot order.
    pub fn populated(&self) -> Vec<ValueType> {
        let mut kinds = Vec::with_capacity(3);
        if self.value_string.is_some() {
            kinds.push(ValueType::String);
        }
        if self.value_number.is_some() {
            kinds.push(ValueType::Number);
        }
        if self.value_boolean.is_some() {
            kinds.push(ValueType::Boolean);
        }
        kinds
    }

    /// Collapse into a [`Value`] of the `expected` type.
    ///
    /// Exactly one slot must be populated and it must be the slot matching
    /// `expected`; anything else is a [`CatalogError::TypeMismatch`].
    /// `feature` is only used in the error message.
    pub fn resolve(self, feature: &str, expected: ValueType) -> Result<Value> {
        let populated = self.populated();
        let mismatch = |found: String| CatalogError::TypeMismatch {
            feature: feature.to_string(),
            expected,
            found,
        };

        match populated.as_slice() {
            [] => return Err(mismatch("no value".to_string())),
            [single] if *single != expected => return Err(mismatch(single.to_string())),
            [_] => {}
            many => {
                let names: Vec<_> = many.iter().map(|t| t.as_str()).collect();
                return Err(mismatch(format!("multiple values ({})", names.join(", "))));
            }
        }

        let value = match (self.value_string, self.value_number, self.value_boolean) {
            (Some(s), None, None) => Value::String(s),
            (None, Some(n), None) => Value::Number(n),
            (None, None, Some(b)) => Value::Boolean(b),
            _ => unreachable!("exactly one slot checked above"),
        };
        value.validate()?;
        Ok(value)
    }
}

impl From<Value> for ValueSlots {
    fn from(value: Value) -> Self {
        value.to_slots()
    }
}
