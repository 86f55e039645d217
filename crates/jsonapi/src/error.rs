use jsonapi_document::{DocumentError, ErrorObject};
use thiserror::Error;

use crate::coerce::WireKind;

/// Everything that can go wrong while mapping records to or from documents.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bad jsonapi tag on field `{field}`: {tag:?} needs at least `kind,name`")]
    MalformedTag {
        field: &'static str,
        tag: &'static str,
    },

    #[error("unsupported jsonapi tag annotation, {0}")]
    UnsupportedAnnotation(String),

    #[error("record `{record}` declares more than one primary field")]
    DuplicatePrimary { record: &'static str },

    #[error("trying to decode an object of type {actual:?}, but {expected:?} does not match")]
    TypeMismatch { expected: String, actual: String },

    #[error("id should be either string or numeric, got {0:?}")]
    BadId(String),

    #[error("invalid type provided: expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: WireKind,
    },

    #[error("numeric value {value} does not fit in {target}")]
    NumericOverflow { value: String, target: &'static str },

    #[error("only numbers can be parsed as dates, unix timestamps")]
    InvalidTime,

    #[error("only strings can be parsed as dates, ISO8601 timestamps")]
    InvalidIso8601,

    #[error("relationship graph is deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("data is not a jsonapi representation of '{record}': {reason}")]
    InvalidDocument {
        record: &'static str,
        reason: String,
    },

    #[error("document carries {} error object(s)", .0.len())]
    ErrorDocument(Vec<ErrorObject>),

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Structural fault inside a record walk. Never escapes a record
    /// boundary; it is turned into [`Error::InvalidDocument`] there.
    #[error("{0}")]
    Internal(String),
}

/// Flat classification of [`Error`], ignoring field context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    MalformedTag,
    UnsupportedAnnotation,
    TypeMismatch,
    BadId,
    InvalidType,
    NumericOverflow,
    InvalidTime,
    InvalidIso8601,
    InvalidLink,
    DepthExceeded,
    InvalidDocument,
    ErrorDocument,
    Json,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedTag { .. } | Self::DuplicatePrimary { .. } => ErrorKind::MalformedTag,
            Self::UnsupportedAnnotation(_) => ErrorKind::UnsupportedAnnotation,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::BadId(_) => ErrorKind::BadId,
            Self::InvalidType { .. } => ErrorKind::InvalidType,
            Self::NumericOverflow { .. } => ErrorKind::NumericOverflow,
            Self::InvalidTime => ErrorKind::InvalidTime,
            Self::InvalidIso8601 => ErrorKind::InvalidIso8601,
            Self::DepthExceeded(_) => ErrorKind::DepthExceeded,
            Self::InvalidDocument { .. } | Self::Internal(_) => ErrorKind::InvalidDocument,
            Self::ErrorDocument(_) => ErrorKind::ErrorDocument,
            Self::Field { source, .. } => source.kind(),
            Self::Document(DocumentError::InvalidLink { .. }) => ErrorKind::InvalidLink,
            Self::Document(DocumentError::Json(_)) | Self::Json(_) => ErrorKind::Json,
            Self::Document(_) => ErrorKind::InvalidDocument,
        }
    }

    /// Attaches the wire name of the field being processed.
    pub(crate) fn in_field(self, field: &str) -> Self {
        match self {
            // Context is already attached by a deeper record.
            Self::Field { .. } | Self::InvalidDocument { .. } => self,
            Self::Internal(reason) => Self::Internal(format!("{field}: {reason}")),
            other => Self::Field {
                field: field.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Converts structural faults into the record-level document error.
    pub(crate) fn at_record(self, record: &'static str) -> Self {
        match self {
            Self::Internal(reason) => Self::InvalidDocument { record, reason },
            other => other,
        }
    }
}
