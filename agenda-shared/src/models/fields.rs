//! Serde helpers shared by the entity models
//!
//! - [`timestamp`]: lenient date input (`2025-03-01`, RFC 3339, epoch millis)
//! - [`nullable`]: tells an explicit `null` apart from a missing key in patches
//! - [`to_fields`]: turns a typed payload into a top-level document field map

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::store::Fields;

/// Serializes `value` into a field map.
///
/// Returns `None` when the payload is not a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Option<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parses a client-supplied date.
///
/// Blank input means "no date". Dates without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Some(Utc.from_utc_datetime(&naive)));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(Utc.from_utc_datetime(&midnight)));
        }
    }

    Err(format!("fecha inválida: {}", input))
}

fn timestamp_from_value(value: Value) -> Result<Option<DateTime<Utc>>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_timestamp(&s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Some)
            .ok_or_else(|| format!("fecha inválida: {}", n)),
        other => Err(format!("fecha inválida: {}", other)),
    }
}

/// Lenient `Option<DateTime<Utc>>` deserializer for request bodies.
///
/// Use with `#[serde(default, deserialize_with = "timestamp::deserialize")]`.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        super::timestamp_from_value(value).map_err(D::Error::custom)
    }

    /// Patch variant: a missing key stays `None`, `null` or `""` becomes `Some(None)`.
    pub fn deserialize_patch<'de, D>(
        deserializer: D,
    ) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize(deserializer).map(Some)
    }
}

/// `Option<Option<T>>` deserializer for clearable patch fields.
///
/// Serde maps a missing key to the field default (`None`) without calling
/// this function, so reaching it means the key was present.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
