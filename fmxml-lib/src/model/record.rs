//! Records of a result set

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::FieldMap;
use super::Value;
use super::xml;
use crate::error::FieldError;

/// One field of a record as sent by the server: its name and one raw string
/// per repetition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawField {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "data", default)]
    pub data: Vec<String>,
}

impl RawField {
    /// Returns the first repetition, if any.
    pub fn first(&self) -> Option<&str> {
        self.data.first().map(String::as_str)
    }
}

/// Records of a related table embedded in a parent record (a portal).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RelatedSet {
    #[serde(rename = "@table", default)]
    pub table: String,

    #[serde(rename = "@count", default, deserialize_with = "xml::lenient_u64")]
    pub count: u64,

    #[serde(rename = "record", default)]
    pub records: Vec<Record>,
}

/// A record of a result set.
///
/// The raw fields and related sets come straight from the XML. The
/// materialized values are filled in by [`materialize`](super::materialize);
/// until then [`values`](Record::values) is empty.
///
/// # Example
///
/// ```
/// use fmxml_lib::model::parse;
///
/// let xml = br#"<fmresultset version="1.0"><error code="0"/>
///   <resultset count="1" fetch-size="1">
///     <record record-id="7" mod-id="2"><field name="name"><data>Ann</data></field></record>
///   </resultset></fmresultset>"#;
///
/// let mut envelope = parse(xml).unwrap();
/// envelope.materialize();
///
/// let record = &envelope.records()[0];
/// assert_eq!(record.id(), 7);
/// assert_eq!(record.get_text("name").unwrap(), Some("Ann"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Record {
    #[serde(rename = "@record-id", default, deserialize_with = "xml::lenient_u64")]
    pub(crate) id: u64,

    #[serde(rename = "@mod-id", default, deserialize_with = "xml::lenient_u64")]
    pub(crate) mod_id: u64,

    #[serde(rename = "field", default)]
    pub(crate) fields: Vec<RawField>,

    #[serde(rename = "relatedset", default)]
    pub(crate) related_sets: Vec<RelatedSet>,

    #[serde(skip)]
    pub(crate) values: FieldMap,
}

impl Record {
    // =========================================================================
    // Raw access
    // =========================================================================

    /// Returns the record ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the modification ID.
    pub fn mod_id(&self) -> u64 {
        self.mod_id
    }

    /// Returns the raw fields in document order.
    pub fn raw_fields(&self) -> &[RawField] {
        &self.fields
    }

    /// Returns the related sets in document order.
    pub fn related_sets(&self) -> &[RelatedSet] {
        &self.related_sets
    }

    /// Returns the related set for a table, if present.
    pub fn related_set(&self, table: &str) -> Option<&RelatedSet> {
        self.related_sets.iter().find(|r| r.table == table)
    }

    /// Returns the first raw datum of a field.
    ///
    /// `name` matches either the full field name or, for qualified related
    /// fields, the part after `::`.
    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name || super::strip_table_prefix(&f.name) == name)
            .and_then(RawField::first)
    }

    /// Returns field name to first raw datum for every field, without coercion.
    ///
    /// Fields with no data map to an empty string.
    pub fn raw_map(&self) -> std::collections::HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.first().unwrap_or_default().to_string()))
            .collect()
    }

    // =========================================================================
    // Materialized values
    // =========================================================================

    /// Returns the materialized field values.
    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    /// Returns a reference to a materialized value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Returns `true` if the materialized values contain the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Exports the materialized values as a JSON object.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.values)
    }

    /// Decodes the materialized values into a caller-defined type.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(serde::Deserialize)]
    /// struct Contact {
    ///     name: String,
    ///     age: Option<u32>,
    /// }
    ///
    /// let contact: Contact = record.decode()?;
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json()?)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a text field value.
    pub fn get_text(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.values.get(field) {
            None => Err(FieldError::missing(self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                self.id,
                field,
                "text",
                other.type_name(),
            )),
        }
    }

    /// Gets a number field value.
    pub fn get_number(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.values.get(field) {
            None => Err(FieldError::missing(self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(
                self.id,
                field,
                "number",
                other.type_name(),
            )),
        }
    }

    /// Gets a date, time, or timestamp field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.values.get(field) {
            None => Err(FieldError::missing(self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(
                self.id,
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }

    /// Gets the repetitions of a repeating field.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.values.get(field) {
            None => Err(FieldError::missing(self.id, field)),
            Some(Value::Null) => Ok(None),
            Some(Value::List(values)) => Ok(Some(values)),
            Some(other) => Err(FieldError::type_mismatch(
                self.id,
                field,
                "list",
                other.type_name(),
            )),
        }
    }

    /// Gets the materialized records of a related set.
    pub fn get_records(&self, table: &str) -> Result<Option<&[FieldMap]>, FieldError> {
        match self.values.get(table) {
            None => Err(FieldError::missing_related_set(self.id, table)),
            Some(Value::Null) => Ok(None),
            Some(Value::Records(records)) => Ok(Some(records)),
            Some(other) => Err(FieldError::type_mismatch(
                self.id,
                table,
                "records",
                other.type_name(),
            )),
        }
    }
}
