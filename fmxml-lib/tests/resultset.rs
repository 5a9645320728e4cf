//! Parsing and materializing result envelopes from recorded responses.

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

use fmxml_lib::error::{FieldError, ProtocolError};
use fmxml_lib::model::{FieldKind, FieldType, Value, zero_timestamp};
use fmxml_lib::{has_error, materialize, parse};

const CONTACTS: &[u8] = include_bytes!("fixtures/contacts.xml");
const RELATED_NO_METADATA: &[u8] = include_bytes!("fixtures/related_no_metadata.xml");
const RECORD_MISSING: &[u8] = include_bytes!("fixtures/record_missing.xml");
const PADDED_TEXT: &[u8] = include_bytes!("fixtures/padded_text.xml");

fn contacts() -> fmxml_lib::model::ResultEnvelope {
    let mut envelope = parse(CONTACTS).unwrap();
    materialize(&mut envelope);
    envelope
}

#[test]
fn test_envelope_header() {
    let envelope = parse(CONTACTS).unwrap();

    assert_eq!(envelope.version(), "1.0");
    assert_eq!(envelope.error_code(), 0);
    assert!(!has_error(&envelope));

    let product = envelope.product().unwrap();
    assert_eq!(product.version, "17.0.3.305");

    let datasource = envelope.datasource().unwrap();
    assert_eq!(datasource.database, "crm");
    assert_eq!(datasource.layout, "contacts_web");
    assert_eq!(datasource.total_count, 42);

    assert_eq!(envelope.resultset().count, 42);
    assert_eq!(envelope.resultset().fetch_size, 2);
    assert_eq!(envelope.records().len(), 2);
}

#[test]
fn test_metadata_definitions() {
    let envelope = parse(CONTACTS).unwrap();
    let metadata = envelope.metadata().unwrap();

    let phones = metadata.definition("phones").unwrap();
    assert_eq!(phones.max_repeat, 3);
    assert!(phones.is_repeating());

    let balance = metadata.definition("balance").unwrap();
    assert_eq!(balance.field_type, FieldType::Number);
    assert_eq!(balance.kind, FieldKind::Calculation);

    let placed = metadata.definition("orders::placed").unwrap();
    assert_eq!(placed.field_type, FieldType::Date);
    assert!(metadata.related_set("orders").is_some());
}

#[test]
fn test_raw_tree_is_untouched_before_materialize() {
    let envelope = parse(CONTACTS).unwrap();
    let record = &envelope.records()[0];

    assert_eq!(record.id(), 101);
    assert_eq!(record.mod_id(), 3);
    assert_eq!(record.raw_value("score"), Some("n/a"));
    assert!(record.values().is_empty());

    let orders = record.related_set("orders").unwrap();
    assert_eq!(orders.count, 2);
    assert_eq!(orders.records[1].raw_value("total"), Some("5"));
}

#[test]
fn test_typed_values() {
    let envelope = contacts();
    let ann = &envelope.records()[0];

    assert_eq!(ann.get_number("id").unwrap(), Some(1.0));
    assert_eq!(ann.get_text("name").unwrap(), Some("Ann Lee"));
    assert_eq!(ann.get_number("balance").unwrap(), Some(12.5));
    assert_eq!(
        ann.get_datetime("birthday").unwrap(),
        Some(Utc.with_ymd_and_hms(1990, 7, 4, 0, 0, 0).unwrap())
    );
    assert_eq!(
        ann.get_datetime("updated").unwrap(),
        Some(Utc.with_ymd_and_hms(2023, 1, 2, 14, 5, 9).unwrap())
    );
    assert!(ann.get_datetime("opens").unwrap().is_some());
}

#[test]
fn test_unparsable_number_becomes_null() {
    let envelope = contacts();
    let ann = &envelope.records()[0];

    assert_eq!(ann.get("score"), Some(&Value::Null));
    assert_eq!(ann.get_number("score").unwrap(), None);
    assert_eq!(ann.to_json().unwrap()["score"], serde_json::Value::Null);

    let bo = &envelope.records()[1];
    assert_eq!(bo.get_number("score").unwrap(), Some(88.0));
}

#[test]
fn test_unparsable_dates_become_zero_timestamp() {
    let envelope = contacts();
    let bo = &envelope.records()[1];

    assert_eq!(bo.get_datetime("birthday").unwrap(), Some(zero_timestamp()));
    assert_eq!(bo.get_datetime("opens").unwrap(), Some(zero_timestamp()));
    assert_eq!(bo.to_json().unwrap()["birthday"], json!("0001-01-01T00:00:00Z"));
}

#[test]
fn test_repeating_fields_are_lists() {
    let envelope = contacts();

    let ann = envelope.records()[0].get_list("phones").unwrap().unwrap();
    assert_eq!(
        ann,
        [Value::from("555-0100"), Value::from("555-0101"), Value::from("")]
    );

    // declared repeating, so a single datum is still a list
    let bo = envelope.records()[1].get_list("phones").unwrap().unwrap();
    assert_eq!(bo, [Value::from("555-0199")]);
}

#[test]
fn test_field_without_data_is_omitted() {
    let envelope = contacts();
    let bo = &envelope.records()[1];

    assert!(!bo.contains("balance"));
    assert_eq!(
        bo.get_number("balance"),
        Err(FieldError::missing(102, "balance"))
    );
}

#[test]
fn test_getter_errors_carry_record_context() {
    let envelope = contacts();
    let ann = &envelope.records()[0];

    assert_eq!(
        ann.get_records("invoices"),
        Err(FieldError::missing_related_set(101, "invoices"))
    );
    let err = ann.get_number("name").unwrap_err();
    assert_eq!(err, FieldError::type_mismatch(101, "name", "number", "text"));
    assert_eq!(err.name(), "name");
}

#[test]
fn test_related_sets_nest_with_stripped_names() {
    let envelope = contacts();
    let ann = &envelope.records()[0];

    let orders = ann.get_records("orders").unwrap().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].get("total"), Some(&Value::Number(19.99)));
    assert_eq!(
        orders[0].get("placed"),
        Some(&Value::DateTime(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()))
    );
    assert_eq!(orders[1].get("placed"), Some(&Value::DateTime(zero_timestamp())));
    assert!(!orders[0].contains_key("orders::total"));

    // nested records keep their own materialized values
    let nested = &ann.related_set("orders").unwrap().records[1];
    assert_eq!(nested.get_number("total").unwrap(), Some(5.0));

    let bo = &envelope.records()[1];
    assert_eq!(bo.get_records("orders").unwrap().unwrap().len(), 0);
}

#[test]
fn test_related_set_without_metadata() {
    let mut envelope = parse(RELATED_NO_METADATA).unwrap();
    assert!(envelope.metadata().is_none());

    envelope.materialize();
    assert_eq!(
        envelope.records()[0].to_json().unwrap(),
        json!({ "Total": [{ "Qty": "5" }] })
    );
}

#[test]
fn test_text_keeps_surrounding_whitespace() {
    let mut envelope = parse(PADDED_TEXT).unwrap();
    let record = &envelope.records()[0];
    assert_eq!(record.raw_value("note"), Some("  padded  "));
    assert_eq!(record.raw_fields()[1].data, [" A1", "B2 "]);

    envelope.materialize();
    let record = &envelope.records()[0];
    assert_eq!(record.get("note"), Some(&Value::from("  padded  ")));
    assert_eq!(
        record.get_list("codes").unwrap().unwrap(),
        [Value::from(" A1"), Value::from("B2 ")]
    );

    let lines = record.get_records("lines").unwrap().unwrap();
    assert_eq!(lines[0].get("memo"), Some(&Value::from("\ttabbed\t")));
}

#[test]
fn test_records_json_export() {
    let envelope = contacts();
    let exported = envelope.records_json().unwrap();

    assert_eq!(exported[0]["id"], json!(1));
    assert_eq!(exported[0]["balance"], json!(12.5));
    assert_eq!(exported[0]["updated"], json!("2023-01-02T14:05:09Z"));
    assert_eq!(exported[0]["orders"][1]["total"], json!(5));
    assert_eq!(exported[1]["name"], json!("Bo & Co"));
}

#[test]
fn test_decode_into_caller_type() {
    #[derive(Debug, Deserialize)]
    struct Contact {
        id: u32,
        name: String,
        score: Option<f64>,
        phones: Vec<String>,
    }

    let envelope = contacts();
    let ann: Contact = envelope.records()[0].decode().unwrap();

    assert_eq!(ann.id, 1);
    assert_eq!(ann.name, "Ann Lee");
    assert_eq!(ann.score, None);
    assert_eq!(ann.phones, ["555-0100", "555-0101", ""]);
}

#[test]
fn test_materialize_is_repeatable() {
    let mut envelope = contacts();
    let first = envelope.records_json().unwrap();
    envelope.materialize();
    assert_eq!(envelope.records_json().unwrap(), first);
}

#[test]
fn test_protocol_error_envelope() {
    let envelope = parse(RECORD_MISSING).unwrap();

    assert!(has_error(&envelope));
    assert_eq!(envelope.error_code(), 401);
    assert_eq!(envelope.protocol_error(), Some(ProtocolError::from_code(401)));
    assert!(envelope.records().is_empty());
}

#[test]
fn test_malformed_body_is_an_error() {
    assert!(parse(b"<fmresultset><resultset></fmresultset>").is_err());
    assert!(parse(b"not xml at all").is_err());
}
