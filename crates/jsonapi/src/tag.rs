//! Field annotation tags: `kind[,name[,option]*]`.

use crate::error::Error;

pub const ANNOTATION_PRIMARY: &str = "primary";
pub const ANNOTATION_CLIENT_ID: &str = "client-id";
pub const ANNOTATION_ATTRIBUTE: &str = "attr";
pub const ANNOTATION_RELATION: &str = "relation";
pub const ANNOTATION_OMIT_EMPTY: &str = "omitempty";
pub const ANNOTATION_ISO8601: &str = "iso8601";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Resource identifier; the name is the resource type.
    Primary,
    /// Client-generated id, carried through untouched.
    ClientId,
    Attribute,
    Relation,
}

/// A parsed field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// Resource type for `primary`, wire member name otherwise.
    pub name: String,
    pub omit_empty: bool,
    pub iso8601: bool,
}

/// Why a tag was rejected. Kept separate from [`Error`] so parsed schemas can
/// hold it and report it on every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    Malformed,
    Unsupported(String),
}

impl TagError {
    pub(crate) fn to_error(&self, field: &'static str, tag: &'static str) -> Error {
        match self {
            Self::Malformed => Error::MalformedTag { field, tag },
            Self::Unsupported(kind) => Error::UnsupportedAnnotation(kind.clone()),
        }
    }
}

impl Annotation {
    pub fn parse(tag: &str) -> Result<Self, TagError> {
        let mut args = tag.split(',');
        let kind = args.next().unwrap_or_default();
        let name = args.next();

        let kind = match (kind, name) {
            (ANNOTATION_CLIENT_ID, _) => AnnotationKind::ClientId,
            (_, None) => return Err(TagError::Malformed),
            (ANNOTATION_PRIMARY, _) => AnnotationKind::Primary,
            (ANNOTATION_ATTRIBUTE, _) => AnnotationKind::Attribute,
            (ANNOTATION_RELATION, _) => AnnotationKind::Relation,
            (other, _) => return Err(TagError::Unsupported(other.to_string())),
        };

        let mut annotation = Self {
            kind,
            name: name.unwrap_or_default().to_string(),
            omit_empty: false,
            iso8601: false,
        };
        if kind == AnnotationKind::Attribute {
            for option in args {
                match option {
                    ANNOTATION_OMIT_EMPTY => annotation.omit_empty = true,
                    ANNOTATION_ISO8601 => annotation.iso8601 = true,
                    _ => {}
                }
            }
        }
        Ok(annotation)
    }
}
