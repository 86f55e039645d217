//! `Option`, `Vec` and `Box` forward to their element type.

use jsonapi_document::{Linkage, ResourceIdentifier};
use serde_json::Value;

use super::{invalid_type, Coercion, FieldValue};
use crate::decode::DecodeCtx;
use crate::encode::EncodeCtx;
use crate::error::Error;

impl<T: FieldValue> FieldValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            other => T::decode_attr(other, c).map(Some),
        }
    }

    fn encode_attr(&self, iso8601: bool) -> Result<Value, Error> {
        match self {
            Some(inner) => inner.encode_attr(iso8601),
            None => Ok(Value::Null),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn decode_id(id: &str, c: &Coercion<'_>) -> Result<Self, Error> {
        T::decode_id(id, c).map(Some)
    }

    fn encode_id(&self) -> Result<String, Error> {
        match self {
            Some(inner) => inner.encode_id(),
            None => Ok(String::new()),
        }
    }

    fn is_record() -> bool {
        T::is_record()
    }

    fn decode_related(target: &ResourceIdentifier, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        T::decode_related(target, ctx).map(Some)
    }

    fn decode_relation(linkage: &Linkage, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        match linkage {
            Linkage::One(None) => Ok(None),
            other => T::decode_relation(other, ctx).map(Some),
        }
    }

    fn encode_related(&self, ctx: &mut EncodeCtx<'_>) -> Result<ResourceIdentifier, Error> {
        match self {
            Some(inner) => inner.encode_related(ctx),
            None => Err(Error::Internal(
                "empty element in a to-many relation".to_string(),
            )),
        }
    }

    fn encode_relation(&self, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error> {
        match self {
            Some(inner) => inner.encode_relation(ctx),
            None => Ok(T::empty_relation()),
        }
    }

    fn empty_relation() -> Linkage {
        T::empty_relation()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
        let Value::Array(items) = value else {
            return Err(invalid_type(Self::EXPECTED, value));
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::decode_attr(item, c) {
                Ok(v) => out.push(v),
                Err(err) if T::is_record() && c.options.skip_invalid_elements => {
                    tracing::warn!(index, error = %err, "skipping undecodable array element");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }

    fn encode_attr(&self, iso8601: bool) -> Result<Value, Error> {
        self.iter()
            .map(|item| item.encode_attr(iso8601))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode_relation(linkage: &Linkage, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        match linkage {
            Linkage::Many(targets) => targets
                .iter()
                .map(|target| T::decode_related(target, ctx))
                .collect(),
            Linkage::One(_) => Err(Error::Internal(
                "to-one linkage for a to-many field".to_string(),
            )),
        }
    }

    fn encode_relation(&self, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error> {
        self.iter()
            .map(|item| item.encode_related(ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Linkage::Many)
    }

    fn empty_relation() -> Linkage {
        Linkage::Many(Vec::new())
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error> {
        T::decode_attr(value, c).map(Box::new)
    }

    fn encode_attr(&self, iso8601: bool) -> Result<Value, Error> {
        (**self).encode_attr(iso8601)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn decode_id(id: &str, c: &Coercion<'_>) -> Result<Self, Error> {
        T::decode_id(id, c).map(Box::new)
    }

    fn encode_id(&self) -> Result<String, Error> {
        (**self).encode_id()
    }

    fn is_record() -> bool {
        T::is_record()
    }

    fn decode_related(target: &ResourceIdentifier, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        T::decode_related(target, ctx).map(Box::new)
    }

    fn decode_relation(linkage: &Linkage, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        T::decode_relation(linkage, ctx).map(Box::new)
    }

    fn encode_related(&self, ctx: &mut EncodeCtx<'_>) -> Result<ResourceIdentifier, Error> {
        (**self).encode_related(ctx)
    }

    fn encode_relation(&self, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error> {
        (**self).encode_relation(ctx)
    }

    fn empty_relation() -> Linkage {
        T::empty_relation()
    }
}
