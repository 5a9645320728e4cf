//! Value enum for coerced field values

use std::collections::HashMap;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;
use serde::Serializer;

/// A record's materialized fields: field name to coerced value.
pub type FieldMap = HashMap<String, Value>;

/// A field value after coercion per the layout's field metadata.
///
/// # Type Mapping
///
/// | Field type | Rust Variant |
/// |------------|--------------|
/// | text, container | `Text` |
/// | number | `Number` (`Null` if unparsable) |
/// | date, time, timestamp | `DateTime` (zero timestamp if unparsable) |
/// | repeating field | `List` |
/// | related set | `Records` |
///
/// # Serialization
///
/// Values serialize untagged: numbers with no fractional part as JSON
/// integers, timestamps as RFC 3339 strings, related sets as arrays of objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null placeholder for a value that failed to parse.
    #[default]
    Null,
    /// Text or container value, passed through as-is.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date, time, or timestamp value (UTC).
    DateTime(DateTime<Utc>),
    /// Repetitions of a repeating field, in order.
    List(Vec<Value>),
    /// The records of a related set, in order.
    Records(Vec<FieldMap>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Records(_) => "records",
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) => {
                // Whole numbers go out as integers so they decode into integer fields.
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::List(values) => values.serialize(serializer),
            Value::Records(records) => records.serialize(serializer),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
