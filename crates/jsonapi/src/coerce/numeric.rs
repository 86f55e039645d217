//! Integer and float fields.
//!
//! Wire numbers carry no width. Integral wire values are narrowed exactly;
//! fractional ones are truncated toward zero first. Range checks follow
//! [`NumericMode`].

use serde_json::{Number, Value};

use super::{invalid_type, Coercion, FieldValue};
use crate::error::Error;
use crate::options::NumericMode;

fn overflow(n: &Number, target: &'static str) -> Error {
    Error::NumericOverflow {
        value: n.to_string(),
        target,
    }
}

/// Parses a textual identifier into a wire number.
fn parse_id(id: &str) -> Result<Number, Error> {
    if let Ok(i) = id.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = id.parse::<u64>() {
        return Ok(Number::from(u));
    }
    id.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| Error::BadId(id.to_string()))
}

fn wire_number<'a>(value: &'a Value, expected: &'static str) -> Result<&'a Number, Error> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(invalid_type(expected, other)),
    }
}

trait Narrow: Sized {
    fn narrow(n: &Number, mode: NumericMode) -> Result<Self, Error>;
}

macro_rules! integer_field {
    ($($t:ty),* $(,)?) => {$(
        impl Narrow for $t {
            fn narrow(n: &Number, mode: NumericMode) -> Result<Self, Error> {
                let target = stringify!($t);
                if let Some(i) = n.as_i64() {
                    return match <$t>::try_from(i) {
                        Ok(v) => Ok(v),
                        Err(_) if mode == NumericMode::Truncate => Ok(i as $t),
                        Err(_) => Err(overflow(n, target)),
                    };
                }
                if let Some(u) = n.as_u64() {
                    return match <$t>::try_from(u) {
                        Ok(v) => Ok(v),
                        Err(_) if mode == NumericMode::Truncate => Ok(u as $t),
                        Err(_) => Err(overflow(n, target)),
                    };
                }
                let f = n.as_f64().ok_or_else(|| overflow(n, target))?.trunc();
                // `MAX as f64` rounds up for 64-bit targets, so compare
                // against the next integer instead of MAX itself.
                let (lo, hi) = (<$t>::MIN as f64, <$t>::MAX as f64 + 1.0);
                if mode == NumericMode::Checked && !(f >= lo && f < hi) {
                    return Err(overflow(n, target));
                }
                Ok(f as $t)
            }
        }

        impl FieldValue for $t {
            const EXPECTED: &'static str = stringify!($t);

            fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
                Self::narrow(wire_number(value, Self::EXPECTED)?, c.options.numeric)
            }

            fn encode_attr(&self, _iso8601: bool) -> Result<Value, Error> {
                Ok(Value::from(*self))
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn decode_id(id: &str, c: &Coercion<'_>) -> Result<Self, Error> {
                Self::narrow(&parse_id(id)?, c.options.numeric)
            }

            fn encode_id(&self) -> Result<String, Error> {
                Ok(self.to_string())
            }
        }
    )*};
}

integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Narrow for f64 {
    fn narrow(n: &Number, _mode: NumericMode) -> Result<Self, Error> {
        n.as_f64().ok_or_else(|| overflow(n, "f64"))
    }
}

impl Narrow for f32 {
    fn narrow(n: &Number, mode: NumericMode) -> Result<Self, Error> {
        let f = n.as_f64().ok_or_else(|| overflow(n, "f32"))?;
        if mode == NumericMode::Checked && f.abs() > f64::from(f32::MAX) {
            return Err(overflow(n, "f32"));
        }
        Ok(f as f32)
    }
}

macro_rules! float_field {
    ($($t:ty),* $(,)?) => {$(
        impl FieldValue for $t {
            const EXPECTED: &'static str = stringify!($t);

            fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
                Self::narrow(wire_number(value, Self::EXPECTED)?, c.options.numeric)
            }

            fn encode_attr(&self, _iso8601: bool) -> Result<Value, Error> {
                Number::from_f64(f64::from(*self))
                    .map(Value::Number)
                    .ok_or_else(|| Error::NumericOverflow {
                        value: self.to_string(),
                        target: "JSON number",
                    })
            }

            fn is_zero(&self) -> bool {
                *self == 0.0
            }

            fn decode_id(id: &str, c: &Coercion<'_>) -> Result<Self, Error> {
                Self::narrow(&parse_id(id)?, c.options.numeric)
            }

            fn encode_id(&self) -> Result<String, Error> {
                Ok(self.to_string())
            }
        }
    )*};
}

float_field!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::DecodeOptions;
    use serde_json::json;

    fn checked() -> DecodeOptions {
        DecodeOptions::default()
    }

    fn truncating() -> DecodeOptions {
        DecodeOptions {
            numeric: NumericMode::Truncate,
            ..Default::default()
        }
    }

    #[test]
    fn fractions_truncate_toward_zero() {
        let opts = checked();
        let c = Coercion::new(&opts);
        assert_eq!(i32::decode_attr(&json!(3.9), &c).unwrap(), 3);
        assert_eq!(i32::decode_attr(&json!(-3.9), &c).unwrap(), -3);
        assert_eq!(u8::decode_attr(&json!(255.5), &c).unwrap(), 255);
    }

    #[test]
    fn checked_mode_rejects_out_of_range() {
        let opts = checked();
        let c = Coercion::new(&opts);
        let err = u8::decode_attr(&json!(300), &c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericOverflow);
        assert!(u32::decode_attr(&json!(-1), &c).is_err());
        assert!(i64::decode_attr(&json!(9.3e18), &c).is_err());
        assert!(f32::decode_attr(&json!(1e300), &c).is_err());
        assert_eq!(i64::decode_attr(&json!(i64::MAX), &c).unwrap(), i64::MAX);
        assert_eq!(u64::decode_attr(&json!(u64::MAX), &c).unwrap(), u64::MAX);
    }

    #[test]
    fn truncate_mode_casts_silently() {
        let opts = truncating();
        let c = Coercion::new(&opts);
        assert_eq!(u8::decode_attr(&json!(300), &c).unwrap(), 44);
        assert_eq!(i8::decode_attr(&json!(-129), &c).unwrap(), 127);
        assert_eq!(u32::decode_attr(&json!(-1), &c).unwrap(), u32::MAX);
    }

    #[test]
    fn non_numbers_are_invalid_type() {
        let opts = checked();
        let c = Coercion::new(&opts);
        let err = i32::decode_attr(&json!("12"), &c).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidType {
                expected: "i32",
                found: crate::coerce::WireKind::String
            }
        ));
        assert_eq!(
            f64::decode_attr(&json!(true), &c).unwrap_err().kind(),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn ids_parse_from_text() {
        let opts = checked();
        let c = Coercion::new(&opts);
        assert_eq!(u64::decode_id("42", &c).unwrap(), 42);
        assert_eq!(i16::decode_id("-7", &c).unwrap(), -7);
        assert_eq!(f32::decode_id("1.5", &c).unwrap(), 1.5);
        assert_eq!(i32::decode_id("abc", &c).unwrap_err().kind(), ErrorKind::BadId);
        assert_eq!(i32::decode_id("", &c).unwrap_err().kind(), ErrorKind::BadId);
        assert_eq!(i32::decode_id("NaN", &c).unwrap_err().kind(), ErrorKind::BadId);
    }

    #[test]
    fn encode_keeps_integers_exact() {
        assert_eq!(u64::MAX.encode_attr(false).unwrap(), json!(u64::MAX));
        assert_eq!((-5i8).encode_attr(false).unwrap(), json!(-5));
        assert_eq!(2.5f32.encode_attr(false).unwrap(), json!(2.5));
        assert!(f64::NAN.encode_attr(false).is_err());
        assert_eq!(42u16.encode_id().unwrap(), "42");
    }
}
