//! Builds each record's materialized values from the raw tree.

use super::FieldMap;
use super::Metadata;
use super::Record;
use super::ResultEnvelope;
use super::Value;
use super::coerce_field;

/// Separator between a related table and a field name: `table::field`.
const TABLE_SEPARATOR: &str = "::";

/// Builds the materialized values of every record in the envelope, nested
/// related records included.
///
/// Values are coerced per the envelope's field metadata; without metadata
/// every field is text. Inside related sets the `table::` qualifier is
/// stripped from field names, and each related set appears in its parent's
/// values under the table name as a [`Value::Records`].
///
/// Coercion failures never abort this walk. Calling it again rebuilds the
/// same values.
pub fn materialize(envelope: &mut ResultEnvelope) {
    let ResultEnvelope {
        metadata,
        resultset,
        ..
    } = envelope;
    let metadata = metadata.as_ref();

    for record in &mut resultset.records {
        materialize_record(record, metadata, false);
    }
}

/// Returns the part of a field name after the first `::`, or the whole name
/// if it is not qualified.
pub fn strip_table_prefix(name: &str) -> &str {
    name.split_once(TABLE_SEPARATOR)
        .map_or(name, |(_, field)| field)
}

fn materialize_record(record: &mut Record, metadata: Option<&Metadata>, nested: bool) {
    let mut values = FieldMap::new();

    for field in &record.fields {
        let definition = metadata.and_then(|m| m.definition(&field.name));
        let Some(value) = coerce_field(definition, &field.data) else {
            continue;
        };
        let key: &str = if nested {
            strip_table_prefix(&field.name)
        } else {
            &field.name
        };
        values.insert(key.to_string(), value);
    }

    for set in &mut record.related_sets {
        let nested_values = set
            .records
            .iter_mut()
            .map(|child| {
                materialize_record(child, metadata, true);
                child.values.clone()
            })
            .collect();
        values.insert(set.table.clone(), Value::Records(nested_values));
    }

    record.values = values;
}
