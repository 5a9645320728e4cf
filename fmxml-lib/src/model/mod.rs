//! Result envelope model and materialization.
//!
//! [`parse`] deserializes the server's `fmresultset` XML into a
//! [`ResultEnvelope`] without touching field values. [`materialize`] then
//! walks every record, nested related records included, and builds each
//! record's [`FieldMap`] with values coerced per the envelope's field metadata.

mod coerce;
mod envelope;
mod materialize;
mod metadata;
mod record;
mod value;
mod xml;

pub use coerce::DATE_FORMAT;
pub use coerce::TIME_FORMAT;
pub use coerce::TIMESTAMP_FORMAT;
pub use coerce::coerce_field;
pub use coerce::coerce_scalar;
pub use coerce::zero_timestamp;
pub use envelope::*;
pub use materialize::materialize;
pub use materialize::strip_table_prefix;
pub use metadata::*;
pub use record::*;
pub use value::*;
