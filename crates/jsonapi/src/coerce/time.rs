//! Timestamp fields: epoch seconds by default, ISO-8601 with `iso8601`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use super::{Coercion, FieldValue};
use crate::error::Error;

/// UTC, second precision, literal `Z`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn from_epoch(value: &Value) -> Result<DateTime<Utc>, Error> {
    let Value::Number(n) = value else {
        return Err(Error::InvalidTime);
    };
    let secs = match n.as_i64() {
        Some(secs) => secs,
        None => n.as_f64().ok_or(Error::InvalidTime)?.trunc() as i64,
    };
    DateTime::from_timestamp(secs, 0).ok_or(Error::InvalidTime)
}

/// `YYYY-MM-DDTHH:MM:SSZ` with every field zero-padded.
fn has_iso8601_layout(text: &str) -> bool {
    const LAYOUT: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";
    let bytes = text.as_bytes();
    bytes.len() == LAYOUT.len()
        && bytes.iter().zip(LAYOUT).all(|(&b, &want)| match want {
            b'd' => b.is_ascii_digit(),
            sep => b == sep,
        })
}

fn from_iso8601(value: &Value) -> Result<DateTime<Utc>, Error> {
    let Value::String(text) = value else {
        return Err(Error::InvalidIso8601);
    };
    if !has_iso8601_layout(text) {
        return Err(Error::InvalidIso8601);
    }
    NaiveDateTime::parse_from_str(text, ISO8601_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::InvalidIso8601)
}

impl FieldValue for DateTime<Utc> {
    const EXPECTED: &'static str = "time";

    fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
        if c.iso8601 {
            from_iso8601(value)
        } else {
            from_epoch(value)
        }
    }

    fn encode_attr(&self, iso8601: bool) -> Result<Value, Error> {
        if iso8601 {
            Ok(Value::String(self.format(ISO8601_FORMAT).to_string()))
        } else {
            Ok(Value::from(self.timestamp()))
        }
    }

    /// The Unix epoch counts as unset.
    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::default()
    }
}
