//! Serde helpers for the result-set XML attributes.

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use super::FieldKind;
use super::FieldType;

/// `yes` / `no` flag attributes. Anything but `yes` is false.
pub(crate) fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().eq_ignore_ascii_case("yes"))
}

/// Numeric attributes that the server sometimes leaves empty (e.g. the
/// record IDs of a `-dbnames` listing). Empty means zero.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }
    s.parse()
        .map_err(|_| D::Error::custom(format!("invalid integer attribute: '{}'", s)))
}

/// `max-repeat`, never below one.
pub(crate) fn max_repeat<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_u64(deserializer)?;
    Ok(u32::try_from(n).unwrap_or(u32::MAX).max(1))
}

pub(crate) fn default_max_repeat() -> u32 {
    1
}

pub(crate) fn field_type<'de, D>(deserializer: D) -> Result<FieldType, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(FieldType::parse(&s))
}

pub(crate) fn field_kind<'de, D>(deserializer: D) -> Result<FieldKind, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(FieldKind::parse(&s))
}
