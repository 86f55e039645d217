//! [`FieldValue`](crate::FieldValue) behavior shared by every registered
//! record. The [`resource!`](crate::resource) macro forwards to these.

use jsonapi_document::{Linkage, ResourceIdentifier, ResourceObject};
use serde_json::Value;

use crate::coerce::{invalid_type, Coercion};
use crate::decode::{decode_resource, DecodeCtx};
use crate::encode::{self, EncodeCtx};
use crate::error::Error;
use crate::schema::Resource;

/// Decodes a plain JSON object as a nested value record.
pub fn decode_nested<R: Resource>(value: &Value, c: &Coercion<'_>) -> Result<R, Error> {
    let Value::Object(attributes) = value else {
        return Err(invalid_type("object", value));
    };
    let resource = ResourceObject::from_attributes(attributes.clone());
    decode_resource(&resource, &DecodeCtx::detached(c.options))
}

pub fn encode_nested<R: Resource>(record: &R) -> Result<Value, Error> {
    encode::attributes(record).map(Value::Object)
}

/// A record is zero when every annotated field is.
pub fn is_zero<R: Resource>(record: &R) -> bool {
    R::schema()
        .annotated()
        .all(|(_, field)| field.slot().is_zero(record))
}

pub fn decode_related<R: Resource>(
    target: &ResourceIdentifier,
    ctx: &DecodeCtx<'_>,
) -> Result<R, Error> {
    let ctx = ctx.descend()?;
    let resource = ctx.resolve(target);
    decode_resource(&resource, &ctx)
}

/// To-one relation holding the record directly; explicit `null` resets it.
pub fn decode_to_one<R: Resource>(linkage: &Linkage, ctx: &DecodeCtx<'_>) -> Result<R, Error> {
    match linkage {
        Linkage::One(Some(target)) => decode_related(target, ctx),
        Linkage::One(None) => Ok(R::default()),
        Linkage::Many(_) => Err(Error::Internal(
            "to-many linkage for a to-one field".to_string(),
        )),
    }
}

pub fn encode_related<R: Resource>(
    record: &R,
    ctx: &mut EncodeCtx<'_>,
) -> Result<ResourceIdentifier, Error> {
    encode::encode_related(record, ctx)
}
