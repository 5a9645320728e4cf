//! The result envelope returned for every request.

use serde::Deserialize;

use super::Metadata;
use super::Record;
use super::xml;
use crate::error::ParseError;
use crate::error::ProtocolError;

/// Deserializes a response body into a [`ResultEnvelope`].
///
/// Field values are left raw; call [`ResultEnvelope::materialize`] to coerce
/// them. Malformed XML is a hard error and no partial envelope is returned.
pub fn parse(bytes: &[u8]) -> Result<ResultEnvelope, ParseError> {
    Ok(quick_xml::de::from_reader(bytes)?)
}

/// Returns `true` when the envelope's protocol error code is non-zero.
pub fn has_error(envelope: &ResultEnvelope) -> bool {
    envelope.has_error()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
struct ErrorElement {
    #[serde(rename = "@code", default)]
    code: i32,
}

/// The server product that produced the response: `<product .../>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Product {
    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@version", default)]
    pub version: String,

    #[serde(rename = "@build", default)]
    pub build: String,
}

/// Where the records came from and how dates are formatted: `<datasource .../>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DataSource {
    #[serde(rename = "@database", default)]
    pub database: String,

    #[serde(rename = "@layout", default)]
    pub layout: String,

    #[serde(rename = "@table", default)]
    pub table: String,

    #[serde(rename = "@date-format", default)]
    pub date_format: String,

    #[serde(rename = "@time-format", default)]
    pub time_format: String,

    #[serde(rename = "@timestamp-format", default)]
    pub timestamp_format: String,

    /// Number of records in the table, before any find.
    #[serde(rename = "@total-count", default, deserialize_with = "xml::lenient_u64")]
    pub total_count: u64,
}

/// The `<resultset>` element: found-set size and the fetched records.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResultSet {
    /// Number of records in the found set.
    #[serde(rename = "@count", default, deserialize_with = "xml::lenient_u64")]
    pub count: u64,

    /// Number of records actually returned (after skip/max).
    #[serde(rename = "@fetch-size", default, deserialize_with = "xml::lenient_u64")]
    pub fetch_size: u64,

    #[serde(rename = "record", default)]
    pub records: Vec<Record>,
}

/// A parsed response.
///
/// Immutable after parse apart from the materialized values, which
/// [`materialize`](ResultEnvelope::materialize) derives from the raw tree.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResultEnvelope {
    #[serde(rename = "@version", default)]
    pub(crate) version: String,

    #[serde(rename = "error", default)]
    error: ErrorElement,

    #[serde(rename = "product", default)]
    pub(crate) product: Option<Product>,

    #[serde(rename = "datasource", default)]
    pub(crate) datasource: Option<DataSource>,

    #[serde(rename = "metadata", default)]
    pub(crate) metadata: Option<Metadata>,

    #[serde(rename = "resultset", default)]
    pub(crate) resultset: ResultSet,
}

impl ResultEnvelope {
    /// Returns the protocol version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the protocol error code (0 when no error was reported).
    pub fn error_code(&self) -> i32 {
        self.error.code
    }

    /// Returns `true` when the protocol error code is non-zero.
    pub fn has_error(&self) -> bool {
        self.error.code != 0
    }

    /// Returns the protocol error, if the code is non-zero.
    pub fn protocol_error(&self) -> Option<ProtocolError> {
        self.has_error()
            .then(|| ProtocolError::from_code(self.error.code))
    }

    /// Returns the product element, if present.
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Returns the data-source element, if present.
    pub fn datasource(&self) -> Option<&DataSource> {
        self.datasource.as_ref()
    }

    /// Returns the field metadata, if present.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Returns the result set.
    pub fn resultset(&self) -> &ResultSet {
        &self.resultset
    }

    /// Returns the fetched records.
    pub fn records(&self) -> &[Record] {
        &self.resultset.records
    }

    /// Consumes the envelope and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.resultset.records
    }

    /// Builds every record's materialized values. See [`super::materialize`].
    pub fn materialize(&mut self) {
        super::materialize(self);
    }

    /// Exports every record's materialized values as a JSON array.
    pub fn records_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.records()
            .iter()
            .map(Record::to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)
    }
}
