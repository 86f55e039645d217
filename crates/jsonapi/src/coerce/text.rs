use serde_json::Value;

use super::{invalid_type, Coercion, FieldValue};
use crate::error::Error;

impl FieldValue for bool {
    const EXPECTED: &'static str = "bool";

    fn decode_attr(value: &Value, _c: &Coercion<'_>) -> Result<Self, Error> {
        value
            .as_bool()
            .ok_or_else(|| invalid_type(Self::EXPECTED, value))
    }

    fn encode_attr(&self, _iso8601: bool) -> Result<Value, Error> {
        Ok(Value::Bool(*self))
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn decode_attr(value: &Value, _c: &Coercion<'_>) -> Result<Self, Error> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid_type(Self::EXPECTED, value))
    }

    fn encode_attr(&self, _iso8601: bool) -> Result<Value, Error> {
        Ok(Value::String(self.clone()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode_id(id: &str, _c: &Coercion<'_>) -> Result<Self, Error> {
        Ok(id.to_string())
    }

    fn encode_id(&self) -> Result<String, Error> {
        Ok(self.clone())
    }
}
