//! Records to documents.

use std::collections::HashSet;

use indexmap::IndexMap;
use jsonapi_document::{Document, RelationshipNode, ResourceIdentifier, ResourceObject};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;
use crate::options::EncodeOptions;
use crate::schema::Resource;
use crate::tag::AnnotationKind;

/// Related resources collected during one encode call, in discovery order.
/// The first occurrence of an identifier is kept.
pub(crate) type IncludedSet = IndexMap<ResourceIdentifier, ResourceObject>;

/// State shared by one encode call.
#[derive(Debug)]
pub struct EncodeCtx<'a> {
    included: Option<&'a mut IncludedSet>,
}

impl<'a> EncodeCtx<'a> {
    pub(crate) fn new(included: Option<&'a mut IncludedSet>) -> Self {
        Self { included }
    }

    /// Identifiers only, nothing is side-loaded.
    pub(crate) fn shallow() -> Self {
        Self { included: None }
    }
}

/// Encodes one record as a resource object.
pub(crate) fn encode_resource<R: Resource>(
    record: &R,
    ctx: &mut EncodeCtx<'_>,
) -> Result<ResourceObject, Error> {
    let schema = R::schema();
    schema.check()?;
    build(record, ctx).map_err(|err| err.at_record(schema.record()))
}

fn build<R: Resource>(record: &R, ctx: &mut EncodeCtx<'_>) -> Result<ResourceObject, Error> {
    let caps = record.capabilities();
    let mut out = ResourceObject::default();

    for (annotation, field) in R::schema().annotated() {
        let slot = field.slot();
        match annotation.kind {
            AnnotationKind::Primary => {
                out.type_ = annotation.name.clone();
                out.id = slot
                    .encode_id(record)
                    .map_err(|err| err.in_field(field.name()))?;
            }
            AnnotationKind::ClientId => {
                let client_id = slot
                    .encode_id(record)
                    .map_err(|err| err.in_field(field.name()))?;
                if !client_id.is_empty() {
                    out.client_id = Some(client_id);
                }
            }
            AnnotationKind::Attribute => {
                if annotation.omit_empty && slot.is_zero(record) {
                    continue;
                }
                let value = slot
                    .encode_attr(record, annotation.iso8601)
                    .map_err(|err| err.in_field(&annotation.name))?;
                out.attributes.insert(annotation.name.clone(), value);
            }
            AnnotationKind::Relation => {
                let linkage = slot
                    .encode_relation(record, ctx)
                    .map_err(|err| err.in_field(&annotation.name))?;
                let mut node = RelationshipNode::new(linkage);
                if let Some(links) = caps
                    .relationship_links
                    .and_then(|hook| hook.relationship_links(&annotation.name))
                {
                    links.validate()?;
                    node.links = Some(links);
                }
                node.meta = caps
                    .relationship_meta
                    .and_then(|hook| hook.relationship_meta(&annotation.name));
                out.relationships.insert(annotation.name.clone(), node);
            }
        }
    }

    if let Some(links) = caps.links.and_then(|hook| hook.links()) {
        links.validate()?;
        out.links = Some(links);
    }
    out.meta = caps.meta.and_then(|hook| hook.meta());
    Ok(out)
}

/// The `(type, id)` of a record, from its `primary` field.
pub(crate) fn identifier<R: Resource>(record: &R) -> Result<ResourceIdentifier, Error> {
    let schema = R::schema();
    schema.check()?;
    let Some((type_, field)) = schema.primary() else {
        return Err(Error::Internal(format!(
            "{} has no primary field and cannot be related",
            schema.record()
        )));
    };
    let id = field
        .slot()
        .encode_id(record)
        .map_err(|err| err.in_field(field.name()))?;
    Ok(ResourceIdentifier::new(type_, id))
}

/// Links a related record. When the context collects included resources, the
/// record and everything it relates to are side-loaded once each.
pub(crate) fn encode_related<R: Resource>(
    record: &R,
    ctx: &mut EncodeCtx<'_>,
) -> Result<ResourceIdentifier, Error> {
    let identifier = identifier(record)?;
    if let Some(included) = ctx.included.as_deref_mut() {
        if !included.contains_key(&identifier) {
            // Reserve the slot first so a cycle back to this record stops here.
            included.insert(identifier.clone(), ResourceObject::stub(&identifier));
            let mut nested = EncodeCtx::new(Some(&mut *included));
            let resource = encode_resource(record, &mut nested)?;
            included.insert(identifier.clone(), resource);
        }
    }
    Ok(identifier)
}

/// The attribute object of a nested value record.
pub(crate) fn attributes<R: Resource>(record: &R) -> Result<Map<String, Value>, Error> {
    Ok(encode_resource(record, &mut EncodeCtx::shallow())?.attributes)
}

/// Drops included resources that already appear as primary data.
fn finish_included(included: IncludedSet, data: &[ResourceObject]) -> Vec<ResourceObject> {
    let primaries: HashSet<ResourceIdentifier> = data
        .iter()
        .filter(|r| !r.id.is_empty())
        .map(ResourceObject::identifier)
        .collect();
    included
        .into_iter()
        .filter(|(identifier, _)| !primaries.contains(identifier))
        .map(|(_, resource)| resource)
        .collect()
}

/// Builds documents from registered records.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encodes a single-resource document.
    pub fn encode<R: Resource>(&self, record: &R) -> Result<Document, Error> {
        let mut included = IncludedSet::new();
        let mut ctx = EncodeCtx::new(self.options.include.then_some(&mut included));
        let data = encode_resource(record, &mut ctx)?;
        let included = finish_included(included, std::slice::from_ref(&data));
        debug!(
            record = R::schema().record(),
            included = included.len(),
            "encoded single resource"
        );
        Ok(Document::Single {
            data: Some(data),
            included,
            links: None,
            meta: None,
        })
    }

    /// Encodes a collection document, preserving order.
    pub fn encode_many<R: Resource>(&self, records: &[R]) -> Result<Document, Error> {
        let mut included = IncludedSet::new();
        let mut data = Vec::with_capacity(records.len());
        for record in records {
            let mut ctx = EncodeCtx::new(self.options.include.then_some(&mut included));
            data.push(encode_resource(record, &mut ctx)?);
        }
        let included = finish_included(included, &data);
        debug!(
            record = R::schema().record(),
            resources = data.len(),
            included = included.len(),
            "encoded collection"
        );
        Ok(Document::Collection {
            data,
            included,
            links: None,
            meta: None,
        })
    }

    pub fn to_value<R: Resource>(&self, record: &R) -> Result<Value, Error> {
        Ok(self.encode(record)?.to_value())
    }

    pub fn to_string<R: Resource>(&self, record: &R) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_value(record)?)?)
    }

    pub fn to_vec<R: Resource>(&self, record: &R) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.to_value(record)?)?)
    }
}
