use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::errors::TimestampError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalizes a transaction timestamp string into a UTC instant.
///
/// RFC 3339 values keep their offset and are converted to UTC. Values without
/// an offset are accepted in either the `T` or space separated form and are
/// interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::UnrecognizedFormat(value.to_string()))
}
