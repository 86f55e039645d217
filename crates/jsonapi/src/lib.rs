//! Typed JSON:API codec.
//!
//! Records declared with [`resource!`] map to and from JSON:API documents:
//! one field is the `primary` key, others are `attr` attributes, `relation`
//! links to other records, or a `client-id`. Decoding rebuilds the related
//! records from the document's `included` resources; encoding side-loads them.
//!
//! ```
//! use jsonapi::resource;
//!
//! resource! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Author {
//!         pub id: u64 => "primary,authors",
//!         pub name: String => "attr,name",
//!     }
//! }
//!
//! resource! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Article {
//!         pub id: u64 => "primary,articles",
//!         pub title: String => "attr,title",
//!         pub author: Option<Author> => "relation,author",
//!     }
//! }
//!
//! let article = Article {
//!     id: 1,
//!     title: "JSON:API paints my bikeshed!".into(),
//!     author: Some(Author { id: 9, name: "Dan".into() }),
//! };
//! let json = jsonapi::to_string(&article).unwrap();
//! let back: Article = jsonapi::from_str(&json).unwrap();
//! assert_eq!(back, article);
//! ```

mod coerce;
mod decode;
mod encode;
mod error;
mod macros;
mod options;
mod schema;
pub mod tag;

#[doc(hidden)]
pub mod record;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}

pub use coerce::{Coercion, FieldValue, WireKind, ISO8601_FORMAT};
pub use decode::{DecodeCtx, Decoder};
pub use encode::{EncodeCtx, Encoder};
pub use error::{Error, ErrorKind};
pub use options::{DecodeOptions, EncodeOptions, NumericMode, DEFAULT_MAX_DEPTH};
pub use schema::{Capabilities, Field, Resource, Schema};

pub use jsonapi_document::{
    self as document, Document, DocumentError, ErrorObject, Link, Linkage, Links, Meta,
    ResourceIdentifier, ResourceObject,
};

use serde_json::Value;

/// Decodes a single-resource document from JSON text.
pub fn from_str<R: Resource>(input: &str) -> Result<R, Error> {
    Decoder::default().from_str(input)
}

pub fn from_slice<R: Resource>(input: &[u8]) -> Result<R, Error> {
    Decoder::default().from_slice(input)
}

pub fn from_value<R: Resource>(input: &Value) -> Result<R, Error> {
    Decoder::default().from_value(input)
}

pub fn from_document<R: Resource>(document: &Document) -> Result<R, Error> {
    Decoder::default().decode(document)
}

/// Decodes a collection document from JSON text.
pub fn many_from_str<R: Resource>(input: &str) -> Result<Vec<R>, Error> {
    Decoder::default().many_from_str(input)
}

pub fn many_from_slice<R: Resource>(input: &[u8]) -> Result<Vec<R>, Error> {
    Decoder::default().many_from_slice(input)
}

pub fn many_from_document<R: Resource>(document: &Document) -> Result<Vec<R>, Error> {
    Decoder::default().decode_many(document)
}

/// Encodes one record, with its related records in `included`.
pub fn to_document<R: Resource>(record: &R) -> Result<Document, Error> {
    Encoder::default().encode(record)
}

pub fn to_document_many<R: Resource>(records: &[R]) -> Result<Document, Error> {
    Encoder::default().encode_many(records)
}

pub fn to_value<R: Resource>(record: &R) -> Result<Value, Error> {
    Encoder::default().to_value(record)
}

pub fn to_string<R: Resource>(record: &R) -> Result<String, Error> {
    Encoder::default().to_string(record)
}

pub fn to_vec<R: Resource>(record: &R) -> Result<Vec<u8>, Error> {
    Encoder::default().to_vec(record)
}

/// An `{"errors": [...]}` document.
pub fn errors_to_value(errors: &[ErrorObject]) -> Value {
    Document::errors(errors.to_vec()).to_value()
}

pub fn errors_to_string(errors: &[ErrorObject]) -> Result<String, Error> {
    Ok(serde_json::to_string(&errors_to_value(errors))?)
}
