//! Documents to records.

use std::borrow::Cow;
use std::collections::HashMap;

use jsonapi_document::{Document, ResourceIdentifier, ResourceObject};
use tracing::{debug, trace};

use crate::coerce::Coercion;
use crate::error::Error;
use crate::options::DecodeOptions;
use crate::schema::Resource;
use crate::tag::AnnotationKind;

/// Side-loaded resources of one document, keyed by identity. Later entries
/// replace earlier ones with the same identity.
pub(crate) type IncludedIndex<'a> = HashMap<ResourceIdentifier, &'a ResourceObject>;

fn index_included(included: &[ResourceObject]) -> IncludedIndex<'_> {
    included.iter().map(|r| (r.identifier(), r)).collect()
}

/// State shared by one decode call.
#[derive(Debug, Clone, Copy)]
pub struct DecodeCtx<'a> {
    included: Option<&'a IncludedIndex<'a>>,
    options: &'a DecodeOptions,
    depth: usize,
}

impl<'a> DecodeCtx<'a> {
    pub(crate) fn new(included: &'a IncludedIndex<'a>, options: &'a DecodeOptions) -> Self {
        Self {
            included: Some(included),
            options,
            depth: 0,
        }
    }

    /// A context with nothing side-loaded, used for nested attribute records.
    pub(crate) fn detached(options: &'a DecodeOptions) -> Self {
        Self {
            included: None,
            options,
            depth: 0,
        }
    }

    pub(crate) fn options(&self) -> &'a DecodeOptions {
        self.options
    }

    /// One relationship hop further from the primary resource.
    pub(crate) fn descend(&self) -> Result<Self, Error> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            return Err(Error::DepthExceeded(self.options.max_depth));
        }
        Ok(Self { depth, ..*self })
    }

    /// Looks up a linkage target, falling back to a bare identifier stub.
    pub(crate) fn resolve(&self, target: &ResourceIdentifier) -> Cow<'a, ResourceObject> {
        match self.included.and_then(|index| index.get(target)) {
            Some(found) => {
                trace!(%target, depth = self.depth, "resolved from included");
                Cow::Borrowed(*found)
            }
            None => {
                trace!(%target, depth = self.depth, "not included, using identifier only");
                Cow::Owned(ResourceObject::stub(target))
            }
        }
    }
}

/// Decodes one resource object into a fresh `R`.
pub(crate) fn decode_resource<R: Resource>(
    resource: &ResourceObject,
    ctx: &DecodeCtx<'_>,
) -> Result<R, Error> {
    let schema = R::schema();
    schema.check()?;
    let mut record = R::default();
    walk(&mut record, resource, ctx).map_err(|err| err.at_record(schema.record()))?;
    Ok(record)
}

fn walk<R: Resource>(
    record: &mut R,
    resource: &ResourceObject,
    ctx: &DecodeCtx<'_>,
) -> Result<(), Error> {
    for (annotation, field) in R::schema().annotated() {
        let slot = field.slot();
        match annotation.kind {
            AnnotationKind::Primary => {
                if resource.id.is_empty() {
                    continue;
                }
                if resource.type_ != annotation.name {
                    return Err(Error::TypeMismatch {
                        expected: annotation.name.clone(),
                        actual: resource.type_.clone(),
                    });
                }
                let c = Coercion::new(ctx.options());
                slot.decode_id(record, &resource.id, &c)
                    .map_err(|err| err.in_field(field.name()))?;
            }
            AnnotationKind::ClientId => {}
            AnnotationKind::Attribute => {
                let Some(value) = resource.attributes.get(&annotation.name) else {
                    continue;
                };
                if value.is_null() {
                    continue;
                }
                let c = Coercion {
                    iso8601: annotation.iso8601,
                    options: ctx.options(),
                };
                slot.decode_attr(record, value, &c)
                    .map_err(|err| err.in_field(&annotation.name))?;
            }
            AnnotationKind::Relation => {
                let Some(linkage) = resource
                    .relationships
                    .get(&annotation.name)
                    .and_then(|node| node.data.as_ref())
                else {
                    continue;
                };
                slot.decode_relation(record, linkage, ctx)
                    .map_err(|err| err.in_field(&annotation.name))?;
            }
        }
    }
    Ok(())
}

/// Maps documents onto registered records.
///
/// ```
/// use jsonapi::{resource, Decoder, DecodeOptions, NumericMode};
///
/// resource! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Counter {
///         pub id: u32 => "primary,counters",
///         pub hits: u8 => "attr,hits",
///     }
/// }
///
/// let input = r#"{"data": {"type": "counters", "id": "1", "attributes": {"hits": 300}}}"#;
/// assert!(jsonapi::from_str::<Counter>(input).is_err());
///
/// let lenient = Decoder::new(DecodeOptions {
///     numeric: NumericMode::Truncate,
///     ..Default::default()
/// });
/// let counter: Counter = lenient.from_str(input).unwrap();
/// assert_eq!(counter.hits, 44);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes a single-resource document.
    pub fn decode<R: Resource>(&self, document: &Document) -> Result<R, Error> {
        let record = R::schema().record();
        let (data, included) = match document {
            Document::Single {
                data: Some(data),
                included,
                ..
            } => (data, included),
            Document::Single { data: None, .. } => {
                return Err(Error::InvalidDocument {
                    record,
                    reason: "primary data is null".to_string(),
                })
            }
            Document::Collection { .. } => {
                return Err(Error::InvalidDocument {
                    record,
                    reason: "expected a single resource, found a collection".to_string(),
                })
            }
            Document::Errors { errors, .. } => return Err(Error::ErrorDocument(errors.clone())),
        };
        debug!(record, included = included.len(), "decoding single resource");
        let index = index_included(included);
        let ctx = DecodeCtx::new(&index, &self.options);
        decode_resource(data, &ctx)
    }

    /// Decodes a collection document, preserving order.
    pub fn decode_many<R: Resource>(&self, document: &Document) -> Result<Vec<R>, Error> {
        let record = R::schema().record();
        let (data, included) = match document {
            Document::Collection { data, included, .. } => (data, included),
            Document::Single { .. } => {
                return Err(Error::InvalidDocument {
                    record,
                    reason: "expected a collection, found a single resource".to_string(),
                })
            }
            Document::Errors { errors, .. } => return Err(Error::ErrorDocument(errors.clone())),
        };
        debug!(
            record,
            resources = data.len(),
            included = included.len(),
            "decoding collection"
        );
        let index = index_included(included);
        let ctx = DecodeCtx::new(&index, &self.options);
        data.iter().map(|resource| decode_resource(resource, &ctx)).collect()
    }

    pub fn from_str<R: Resource>(&self, input: &str) -> Result<R, Error> {
        self.decode(&Document::from_str(input)?)
    }

    pub fn from_slice<R: Resource>(&self, input: &[u8]) -> Result<R, Error> {
        self.decode(&Document::from_slice(input)?)
    }

    pub fn from_value<R: Resource>(&self, input: &serde_json::Value) -> Result<R, Error> {
        self.decode(&Document::from_value(input)?)
    }

    pub fn many_from_str<R: Resource>(&self, input: &str) -> Result<Vec<R>, Error> {
        self.decode_many(&Document::from_str(input)?)
    }

    pub fn many_from_slice<R: Resource>(&self, input: &[u8]) -> Result<Vec<R>, Error> {
        self.decode_many(&Document::from_slice(input)?)
    }
}
