//! Type coercion between untyped wire values and native field types.
//!
//! [`FieldValue`] is the single seam: every native type that can sit behind a
//! field annotation implements it. Scalars only provide the attribute and
//! identifier halves; records (through [`resource!`](crate::resource)) also
//! provide the relationship halves; `Option`, `Vec` and `Box` forward to their
//! element type.

mod collections;
mod numeric;
mod text;
mod time;

pub use self::time::ISO8601_FORMAT;

use jsonapi_document::{Linkage, ResourceIdentifier};
use serde_json::Value;

use crate::decode::DecodeCtx;
use crate::encode::EncodeCtx;
use crate::error::Error;
use crate::options::DecodeOptions;

/// The shape of an untyped wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl WireKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl std::fmt::Display for WireKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Per-field decode settings.
#[derive(Debug, Clone, Copy)]
pub struct Coercion<'a> {
    /// Times are ISO-8601 strings rather than epoch seconds.
    pub iso8601: bool,
    pub options: &'a DecodeOptions,
}

impl<'a> Coercion<'a> {
    pub fn new(options: &'a DecodeOptions) -> Self {
        Self {
            iso8601: false,
            options,
        }
    }
}

pub(crate) fn invalid_type(expected: &'static str, found: &Value) -> Error {
    Error::InvalidType {
        expected,
        found: WireKind::of(found),
    }
}

/// A native type that can be mapped to and from the wire.
pub trait FieldValue: Sized {
    /// Name of the native kind, used in error messages.
    const EXPECTED: &'static str;

    fn decode_attr(value: &Value, c: &Coercion<'_>) -> Result<Self, Error>;

    fn encode_attr(&self, iso8601: bool) -> Result<Value, Error>;

    /// Whether this is the zero value skipped by `omitempty`.
    fn is_zero(&self) -> bool;

    /// Reads a primary key from its textual wire form.
    fn decode_id(id: &str, _c: &Coercion<'_>) -> Result<Self, Error> {
        Err(Error::BadId(id.to_string()))
    }

    fn encode_id(&self) -> Result<String, Error> {
        Err(Error::Internal(format!(
            "{} cannot be used as a primary key",
            Self::EXPECTED
        )))
    }

    /// Records decode element-wise failures differently inside arrays.
    fn is_record() -> bool {
        false
    }

    /// Decodes the resource a linkage entry points at.
    fn decode_related(target: &ResourceIdentifier, _ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        Err(Error::Internal(format!(
            "relation to {target} needs a record field, found {}",
            Self::EXPECTED
        )))
    }

    fn decode_relation(linkage: &Linkage, ctx: &DecodeCtx<'_>) -> Result<Self, Error> {
        match linkage {
            Linkage::One(Some(target)) => Self::decode_related(target, ctx),
            Linkage::One(None) => Err(Error::Internal(format!(
                "null linkage for a required {} relation",
                Self::EXPECTED
            ))),
            Linkage::Many(_) => Err(Error::Internal(
                "to-many linkage for a to-one field".to_string(),
            )),
        }
    }

    /// Returns the identifier of this related record, side-loading it when
    /// the context collects included resources.
    fn encode_related(&self, _ctx: &mut EncodeCtx<'_>) -> Result<ResourceIdentifier, Error> {
        Err(Error::Internal(format!(
            "relation needs a record field, found {}",
            Self::EXPECTED
        )))
    }

    fn encode_relation(&self, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error> {
        Ok(Linkage::One(Some(self.encode_related(ctx)?)))
    }

    /// Linkage written for an unset optional relation.
    fn empty_relation() -> Linkage {
        Linkage::One(None)
    }
}
