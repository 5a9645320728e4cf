//! Type coercion of raw field data.
//!
//! Coercion is best-effort: a number that does not parse becomes
//! [`Value::Null`] and a date/time that does not parse becomes the
//! [`zero_timestamp`]. Neither aborts materialization.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;
use log::trace;

use super::FieldDefinition;
use super::FieldType;
use super::Value;

/// Layout of date fields: `MM/DD/YYYY`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Layout of time fields: `HH:MM:SS`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Layout of timestamp fields: `MM/DD/YYYY HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Seconds from the Unix epoch back to `0001-01-01T00:00:00Z`.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// The placeholder for dates and times that failed to parse:
/// `0001-01-01T00:00:00Z`.
pub fn zero_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIMESTAMP_SECS, 0).unwrap_or_default()
}

/// Coerces one raw datum to the given field type.
pub fn coerce_scalar(field_type: FieldType, raw: &str) -> Value {
    match field_type {
        FieldType::Number => match raw.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => {
                trace!("number field value {:?} did not parse, using null", raw);
                Value::Null
            }
        },
        FieldType::Date => or_zero(field_type, raw, parse_date(raw)),
        FieldType::Time => or_zero(field_type, raw, parse_time(raw)),
        FieldType::Timestamp => or_zero(field_type, raw, parse_timestamp(raw)),
        FieldType::Text | FieldType::Container => Value::Text(raw.to_string()),
    }
}

/// Coerces all repetitions of a field.
///
/// Returns `None` when the field has no data at all. A field declared as
/// repeating, or carrying more than one datum, becomes a [`Value::List`];
/// otherwise the single datum becomes a scalar. Without a definition the
/// field is treated as non-repeating text.
pub fn coerce_field(definition: Option<&FieldDefinition>, data: &[String]) -> Option<Value> {
    let field_type = definition.map(|d| d.field_type).unwrap_or_default();
    let repeating = definition.is_some_and(FieldDefinition::is_repeating);

    match data {
        [] => None,
        [single] if !repeating => Some(coerce_scalar(field_type, single)),
        many => Some(Value::List(
            many.iter().map(|raw| coerce_scalar(field_type, raw)).collect(),
        )),
    }
}

fn or_zero(field_type: FieldType, raw: &str, parsed: Option<DateTime<Utc>>) -> Value {
    Value::DateTime(parsed.unwrap_or_else(|| {
        trace!(
            "{} field value {:?} did not parse, using zero timestamp",
            field_type.as_str(),
            raw
        );
        zero_timestamp()
    }))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Times land on 0000-01-01, which is what the server's own clients assume
/// for a time without a date.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()?;
    let date = NaiveDate::from_ymd_opt(0, 1, 1)?;
    Some(date.and_time(time).and_utc())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use chrono::TimeZone;
    use chrono::Timelike;

    use super::*;

    fn data(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_number() {
        assert_eq!(coerce_scalar(FieldType::Number, "42"), Value::Number(42.0));
        assert_eq!(coerce_scalar(FieldType::Number, " -1.5 "), Value::Number(-1.5));
        assert_eq!(coerce_scalar(FieldType::Number, "abc"), Value::Null);
        assert_eq!(coerce_scalar(FieldType::Number, ""), Value::Null);
    }

    #[test]
    fn test_date_time_timestamp() {
        assert_eq!(
            coerce_scalar(FieldType::Date, "03/15/2021"),
            Value::DateTime(Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            coerce_scalar(FieldType::Timestamp, "12/31/1999 23:59:58"),
            Value::DateTime(Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 58).unwrap())
        );

        let Value::DateTime(time) = coerce_scalar(FieldType::Time, "08:30:05") else {
            panic!("expected datetime");
        };
        assert_eq!((time.year(), time.month(), time.day()), (0, 1, 1));
        assert_eq!((time.hour(), time.minute(), time.second()), (8, 30, 5));
    }

    #[test]
    fn test_bad_dates_use_zero_timestamp() {
        let zero = Value::DateTime(zero_timestamp());
        assert_eq!(coerce_scalar(FieldType::Date, "2021-03-15"), zero);
        assert_eq!(coerce_scalar(FieldType::Time, "noon"), zero);
        assert_eq!(coerce_scalar(FieldType::Timestamp, ""), zero);
        assert_eq!(zero_timestamp().to_rfc3339(), "0001-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_text_and_container_pass_through() {
        assert_eq!(coerce_scalar(FieldType::Text, " x "), Value::from(" x "));
        assert_eq!(
            coerce_scalar(FieldType::Container, "/fmi/xml/cnt/a.png"),
            Value::from("/fmi/xml/cnt/a.png")
        );
    }

    #[test]
    fn test_field_shapes() {
        let single = FieldDefinition::new("n", FieldType::Number, 1);
        let repeating = FieldDefinition::new("n", FieldType::Number, 3);

        assert_eq!(coerce_field(Some(&single), &[]), None);
        assert_eq!(
            coerce_field(Some(&single), &data(&["1"])),
            Some(Value::Number(1.0))
        );
        assert_eq!(
            coerce_field(Some(&repeating), &data(&["1"])),
            Some(Value::List(vec![Value::Number(1.0)]))
        );
        assert_eq!(
            coerce_field(Some(&single), &data(&["1", "x"])),
            Some(Value::List(vec![Value::Number(1.0), Value::Null]))
        );
    }

    #[test]
    fn test_field_without_metadata_is_text() {
        assert_eq!(coerce_field(None, &data(&["5"])), Some(Value::from("5")));
        assert_eq!(
            coerce_field(None, &data(&["5", "6"])),
            Some(Value::List(vec![Value::from("5"), Value::from("6")]))
        );
    }
}
