//! Field metadata declared by the server for a layout.

use serde::Deserialize;

use super::xml;

/// Data type of a field, from the `result` attribute of its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Time,
    Timestamp,
    Container,
}

impl FieldType {
    /// Parses a `result` attribute. Unknown types are treated as text.
    pub fn parse(s: &str) -> FieldType {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "time" => FieldType::Time,
            "timestamp" => FieldType::Timestamp,
            "container" => FieldType::Container,
            _ => FieldType::Text,
        }
    }

    /// Returns the attribute text for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Timestamp => "timestamp",
            FieldType::Container => "container",
        }
    }
}

/// How a field gets its value, from the `type` attribute of its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    #[default]
    Normal,
    Calculation,
    Summary,
}

impl FieldKind {
    /// Parses a `type` attribute. Unknown kinds are treated as normal.
    pub fn parse(s: &str) -> FieldKind {
        match s.trim().to_ascii_lowercase().as_str() {
            "calculation" => FieldKind::Calculation,
            "summary" => FieldKind::Summary,
            _ => FieldKind::Normal,
        }
    }
}

/// Declaration of one field: `<field-definition .../>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDefinition {
    /// Field name; related fields carry their `table::` qualifier.
    #[serde(rename = "@name")]
    pub name: String,

    /// Data type driving coercion.
    #[serde(rename = "@result", default, deserialize_with = "xml::field_type")]
    pub field_type: FieldType,

    #[serde(rename = "@type", default, deserialize_with = "xml::field_kind")]
    pub kind: FieldKind,

    /// Number of repetitions; at least 1.
    #[serde(
        rename = "@max-repeat",
        default = "xml::default_max_repeat",
        deserialize_with = "xml::max_repeat"
    )]
    pub max_repeat: u32,

    #[serde(rename = "@auto-enter", default, deserialize_with = "xml::yes_no")]
    pub auto_enter: bool,

    #[serde(rename = "@four-digit-year", default, deserialize_with = "xml::yes_no")]
    pub four_digit_year: bool,

    #[serde(rename = "@global", default, deserialize_with = "xml::yes_no")]
    pub global: bool,

    #[serde(rename = "@not-empty", default, deserialize_with = "xml::yes_no")]
    pub not_empty: bool,

    #[serde(rename = "@numeric-only", default, deserialize_with = "xml::yes_no")]
    pub numeric_only: bool,

    #[serde(rename = "@time-of-day", default, deserialize_with = "xml::yes_no")]
    pub time_of_day: bool,
}

impl FieldDefinition {
    /// Creates a definition with the given type and repeat count, all flags off.
    pub fn new(name: impl Into<String>, field_type: FieldType, max_repeat: u32) -> Self {
        Self {
            name: name.into(),
            field_type,
            kind: FieldKind::Normal,
            max_repeat: max_repeat.max(1),
            auto_enter: false,
            four_digit_year: false,
            global: false,
            not_empty: false,
            numeric_only: false,
            time_of_day: false,
        }
    }

    /// Returns `true` if the field declares more than one repetition.
    pub fn is_repeating(&self) -> bool {
        self.max_repeat > 1
    }
}

/// Field declarations for one related set (portal): `<relatedset-definition>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RelatedSetDefinition {
    #[serde(rename = "@table", default)]
    pub table: String,

    #[serde(rename = "field-definition", default)]
    pub fields: Vec<FieldDefinition>,
}

/// The `<metadata>` block of a result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Metadata {
    #[serde(rename = "field-definition", default)]
    pub fields: Vec<FieldDefinition>,

    #[serde(rename = "relatedset-definition", default)]
    pub related_sets: Vec<RelatedSetDefinition>,
}

impl Metadata {
    /// Finds the definition for a raw field name.
    ///
    /// Top-level definitions are searched first, then every related set's
    /// definitions. Names match exactly, `table::` qualifier included.
    pub fn definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .chain(self.related_sets.iter().flat_map(|r| r.fields.iter()))
            .find(|d| d.name == name)
    }

    /// Returns the definitions declared for a related table.
    pub fn related_set(&self, table: &str) -> Option<&RelatedSetDefinition> {
        self.related_sets.iter().find(|r| r.table == table)
    }
}
