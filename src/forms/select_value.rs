//! Select value-shape normalization.
//!
//! Bound select values arrive in several shapes depending on which backend
//! integration produced them: a bare scalar, an array of scalars, `null`,
//! a `{id: …}` wrapper object, or an array of wrappers. This module is the
//! single place those shapes are collapsed; both the inbound (render) and
//! outbound (change) paths go through it.

use serde_json::Value;

/// Closed set of shapes a select value can take after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectValue {
    /// `null` or absent.
    Empty,
    /// A single scalar, already unwrapped.
    One(Value),
    /// A list of scalars, each already unwrapped.
    Many(Vec<Value>),
}

/// Strips a `{id: …}` wrapper, passing every other shape through.
fn unwrap_id(value: Value) -> Value {
    match value {
        Value::Object(mut map) => map.remove("id").unwrap_or(Value::Object(map)),
        other => other,
    }
}

/// Normalizes any of the accepted input shapes.
pub fn normalize_select_value(value: Option<&Value>) -> SelectValue {
    match value {
        None | Some(Value::Null) => SelectValue::Empty,
        Some(Value::Array(items)) => {
            SelectValue::Many(items.iter().cloned().map(unwrap_id).collect())
        }
        Some(other) => SelectValue::One(unwrap_id(other.clone())),
    }
}

impl SelectValue {
    /// The multi-select representation: always an array, `[]` when unset.
    pub fn into_multi(self) -> Value {
        match self {
            SelectValue::Empty => Value::Array(Vec::new()),
            SelectValue::One(v) => Value::Array(vec![v]),
            SelectValue::Many(items) => Value::Array(items),
        }
    }

    /// The single-select representation: one scalar, `null` when unset.
    /// A list collapses to its first element.
    pub fn into_single(self) -> Value {
        match self {
            SelectValue::Empty => Value::Null,
            SelectValue::One(v) => v,
            SelectValue::Many(items) => items.into_iter().next().unwrap_or(Value::Null),
        }
    }
}
