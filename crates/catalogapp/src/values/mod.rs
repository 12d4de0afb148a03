//! # Typed Values
//!
//! Features declare a [`ValueType`]; feature values carry a [`Value`]. The two
//! must agree, and that agreement is the central rule of the catalog.
//!
//! | Type | Rust value | Limits |
//! |------|------------|--------|
//! | `STRING` | `Value::String` | at most 500 characters |
//! | `NUMBER` | `Value::Number` | finite `f64` |
//! | `BOOLEAN` | `Value::Boolean` | none |

mod kind;
mod value;

pub use kind::ValueType;
pub use value::{Value, ValueSlots};

/// Longest string a STRING value may hold, in characters.
pub const MAX_STRING_VALUE_LEN: usize = 500;
