//! Errors from the typed getters on materialized records

/// A typed getter on a [`Record`](crate::model::Record) could not return the
/// requested value.
///
/// Fields the server sent with no `<data>` are left out of the materialized
/// values, so they report [`FieldError::Missing`] too.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// No materialized value under this field name.
    #[error("record {record_id} has no value for field '{field}'")]
    Missing { record_id: u64, field: String },

    /// No related set materialized under this table name.
    #[error("record {record_id} has no related set '{table}'")]
    MissingRelatedSet { record_id: u64, table: String },

    /// The value was coerced to a different kind than the getter returns.
    #[error("field '{field}' of record {record_id} is {actual}, not {expected}")]
    TypeMismatch {
        record_id: u64,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(record_id: u64, field: impl Into<String>) -> Self {
        Self::Missing {
            record_id,
            field: field.into(),
        }
    }

    pub fn missing_related_set(record_id: u64, table: impl Into<String>) -> Self {
        Self::MissingRelatedSet {
            record_id,
            table: table.into(),
        }
    }

    pub fn type_mismatch(
        record_id: u64,
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            record_id,
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Returns the field or related table name the getter was asked for.
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { field, .. } | Self::TypeMismatch { field, .. } => field,
            Self::MissingRelatedSet { table, .. } => table,
        }
    }
}
