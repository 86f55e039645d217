//! Record registration.
//!
//! A [`Schema`] is the ordered list of annotated fields of one record type,
//! built once and shared by every decode and encode of that type. Records
//! normally get one through [`resource!`](crate::resource); implementing
//! [`Resource`] by hand is possible with [`Field::new`].

use jsonapi_document::{
    Linkable, Linkage, MetaProvider, RelationshipLinkable, RelationshipMetaProvider,
};
use serde_json::Value;

use crate::coerce::{Coercion, FieldValue};
use crate::decode::DecodeCtx;
use crate::encode::EncodeCtx;
use crate::error::Error;
use crate::tag::{Annotation, AnnotationKind, TagError};

/// A record type that maps to a JSON:API resource or to a nested attribute
/// object.
pub trait Resource: Default + Sized + 'static {
    fn schema() -> &'static Schema<Self>;

    /// Optional hooks decorating the encoded resource.
    fn capabilities(&self) -> Capabilities<'_> {
        Capabilities::none()
    }
}

/// The capability hooks a record advertises.
#[derive(Clone, Copy, Default)]
pub struct Capabilities<'a> {
    pub links: Option<&'a dyn Linkable>,
    pub relationship_links: Option<&'a dyn RelationshipLinkable>,
    pub meta: Option<&'a dyn MetaProvider>,
    pub relationship_meta: Option<&'a dyn RelationshipMetaProvider>,
}

impl<'a> Capabilities<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn linkable(mut self, record: &'a dyn Linkable) -> Self {
        self.links = Some(record);
        self
    }

    pub fn relationship_linkable(mut self, record: &'a dyn RelationshipLinkable) -> Self {
        self.relationship_links = Some(record);
        self
    }

    pub fn meta(mut self, record: &'a dyn MetaProvider) -> Self {
        self.meta = Some(record);
        self
    }

    pub fn relationship_meta(mut self, record: &'a dyn RelationshipMetaProvider) -> Self {
        self.relationship_meta = Some(record);
        self
    }
}

/// Type-erased access to one field of `R`.
pub(crate) trait Slot<R> {
    fn decode_attr(&self, record: &mut R, value: &Value, c: &Coercion<'_>) -> Result<(), Error>;
    fn encode_attr(&self, record: &R, iso8601: bool) -> Result<Value, Error>;
    fn is_zero(&self, record: &R) -> bool;
    fn decode_id(&self, record: &mut R, id: &str, c: &Coercion<'_>) -> Result<(), Error>;
    fn encode_id(&self, record: &R) -> Result<String, Error>;
    fn decode_relation(
        &self,
        record: &mut R,
        linkage: &Linkage,
        ctx: &DecodeCtx<'_>,
    ) -> Result<(), Error>;
    fn encode_relation(&self, record: &R, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error>;
}

struct Accessor<R, T> {
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T: FieldValue> Slot<R> for Accessor<R, T> {
    fn decode_attr(&self, record: &mut R, value: &Value, c: &Coercion<'_>) -> Result<(), Error> {
        *(self.get_mut)(record) = T::decode_attr(value, c)?;
        Ok(())
    }

    fn encode_attr(&self, record: &R, iso8601: bool) -> Result<Value, Error> {
        (self.get)(record).encode_attr(iso8601)
    }

    fn is_zero(&self, record: &R) -> bool {
        (self.get)(record).is_zero()
    }

    fn decode_id(&self, record: &mut R, id: &str, c: &Coercion<'_>) -> Result<(), Error> {
        *(self.get_mut)(record) = T::decode_id(id, c)?;
        Ok(())
    }

    fn encode_id(&self, record: &R) -> Result<String, Error> {
        (self.get)(record).encode_id()
    }

    fn decode_relation(
        &self,
        record: &mut R,
        linkage: &Linkage,
        ctx: &DecodeCtx<'_>,
    ) -> Result<(), Error> {
        *(self.get_mut)(record) = T::decode_relation(linkage, ctx)?;
        Ok(())
    }

    fn encode_relation(&self, record: &R, ctx: &mut EncodeCtx<'_>) -> Result<Linkage, Error> {
        (self.get)(record).encode_relation(ctx)
    }
}

/// One annotated field.
pub struct Field<R> {
    name: &'static str,
    tag: &'static str,
    annotation: Result<Annotation, TagError>,
    slot: Box<dyn Slot<R> + Send + Sync>,
}

impl<R: 'static> Field<R> {
    /// Registers field `name` carrying `tag`. Tag problems are reported when
    /// the record is first decoded or encoded.
    pub fn new<T: FieldValue + 'static>(
        name: &'static str,
        tag: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        Self {
            name,
            tag,
            annotation: Annotation::parse(tag),
            slot: Box::new(Accessor { get, get_mut }),
        }
    }
}

impl<R> Field<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub(crate) fn slot(&self) -> &dyn Slot<R> {
        &*self.slot
    }
}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

#[derive(Debug)]
enum Problem {
    Tag {
        field: &'static str,
        tag: &'static str,
        error: TagError,
    },
    DuplicatePrimary,
}

/// Annotated fields of record `R`, in declaration order.
#[derive(Debug)]
pub struct Schema<R> {
    record: &'static str,
    fields: Vec<Field<R>>,
    problem: Option<Problem>,
}

impl<R> Schema<R> {
    pub fn new(record: &'static str, fields: Vec<Field<R>>) -> Self {
        let mut problem = None;
        let mut primaries = 0;
        for field in &fields {
            match &field.annotation {
                Err(error) => {
                    problem.get_or_insert(Problem::Tag {
                        field: field.name,
                        tag: field.tag,
                        error: error.clone(),
                    });
                }
                Ok(a) if a.kind == AnnotationKind::Primary => primaries += 1,
                Ok(_) => {}
            }
        }
        if problem.is_none() && primaries > 1 {
            problem = Some(Problem::DuplicatePrimary);
        }
        Self {
            record,
            fields,
            problem,
        }
    }

    /// Name of the record type.
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    /// Fails with the first registration problem, if any.
    pub fn check(&self) -> Result<(), Error> {
        match &self.problem {
            None => Ok(()),
            Some(Problem::Tag { field, tag, error }) => Err(error.to_error(*field, *tag)),
            Some(Problem::DuplicatePrimary) => Err(Error::DuplicatePrimary {
                record: self.record,
            }),
        }
    }

    /// Fields with a valid annotation.
    pub(crate) fn annotated(&self) -> impl Iterator<Item = (&Annotation, &Field<R>)> {
        self.fields
            .iter()
            .filter_map(|field| field.annotation.as_ref().ok().map(|a| (a, field)))
    }

    /// The `primary` field and its resource type.
    pub(crate) fn primary(&self) -> Option<(&str, &Field<R>)> {
        self.annotated()
            .find(|(a, _)| a.kind == AnnotationKind::Primary)
            .map(|(a, field)| (a.name.as_str(), field))
    }
}
