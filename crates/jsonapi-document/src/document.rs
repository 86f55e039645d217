//! Top-level documents.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::error_object::ErrorObject;
use crate::links::{meta_from_value, Links, Meta};
use crate::resource::ResourceObject;

/// A JSON:API top-level document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// `data` is a single resource object or `null`.
    Single {
        data: Option<ResourceObject>,
        included: Vec<ResourceObject>,
        links: Option<Links>,
        meta: Option<Meta>,
    },
    /// `data` is an array of resource objects.
    Collection {
        data: Vec<ResourceObject>,
        included: Vec<ResourceObject>,
        links: Option<Links>,
        meta: Option<Meta>,
    },
    /// `errors` is present; `data` and `included` are not.
    Errors {
        errors: Vec<ErrorObject>,
        meta: Option<Meta>,
    },
}

impl Document {
    pub fn single(data: ResourceObject) -> Self {
        Self::Single {
            data: Some(data),
            included: Vec::new(),
            links: None,
            meta: None,
        }
    }

    pub fn collection(data: Vec<ResourceObject>) -> Self {
        Self::Collection {
            data,
            included: Vec::new(),
            links: None,
            meta: None,
        }
    }

    pub fn errors(errors: Vec<ErrorObject>) -> Self {
        Self::Errors { errors, meta: None }
    }

    /// Side-loaded resources; empty for error documents.
    pub fn included(&self) -> &[ResourceObject] {
        match self {
            Self::Single { included, .. } | Self::Collection { included, .. } => included,
            Self::Errors { .. } => &[],
        }
    }

    pub fn links(&self) -> Option<&Links> {
        match self {
            Self::Single { links, .. } | Self::Collection { links, .. } => links.as_ref(),
            Self::Errors { .. } => None,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Self::Single { meta, .. } | Self::Collection { meta, .. } | Self::Errors { meta, .. } => {
                meta.as_ref()
            }
        }
    }

    /// Sets document-level links. Error documents carry no links and are
    /// returned unchanged.
    pub fn with_links(mut self, value: Links) -> Self {
        if let Self::Single { links, .. } | Self::Collection { links, .. } = &mut self {
            *links = Some(value);
        }
        self
    }

    pub fn with_meta(mut self, value: Meta) -> Self {
        match &mut self {
            Self::Single { meta, .. } | Self::Collection { meta, .. } | Self::Errors { meta, .. } => {
                *meta = Some(value);
            }
        }
        self
    }

    pub fn from_str(input: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    pub fn from_slice(input: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(input)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::NotAnObject {
            context: "document",
        })?;

        let meta = match obj.get("meta") {
            None | Some(Value::Null) => None,
            Some(m) => Some(meta_from_value(m)?),
        };

        if let Some(errors) = obj.get("errors") {
            let errors = errors
                .as_array()
                .ok_or(DocumentError::member("errors", "an array"))?
                .iter()
                .map(ErrorObject::from_value)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::Errors { errors, meta });
        }

        let included = match obj.get("included") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(ResourceObject::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(DocumentError::member("included", "an array")),
        };
        let links = match obj.get("links") {
            None | Some(Value::Null) => None,
            Some(l) => Some(Links::from_value(l)?),
        };

        match obj.get("data") {
            None => Err(DocumentError::MissingPrimaryData),
            Some(Value::Array(items)) => Ok(Self::Collection {
                data: items
                    .iter()
                    .map(ResourceObject::from_value)
                    .collect::<Result<Vec<_>, _>>()?,
                included,
                links,
                meta,
            }),
            Some(Value::Null) => Ok(Self::Single {
                data: None,
                included,
                links,
                meta,
            }),
            Some(data) => Ok(Self::Single {
                data: Some(ResourceObject::from_value(data)?),
                included,
                links,
                meta,
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        match self {
            Self::Single {
                data,
                included,
                links,
                meta,
            } => {
                let data = data.as_ref().map_or(Value::Null, ResourceObject::to_value);
                out.insert("data".to_string(), data);
                write_common(&mut out, included, links.as_ref(), meta.as_ref());
            }
            Self::Collection {
                data,
                included,
                links,
                meta,
            } => {
                let data = data.iter().map(ResourceObject::to_value).collect();
                out.insert("data".to_string(), Value::Array(data));
                write_common(&mut out, included, links.as_ref(), meta.as_ref());
            }
            Self::Errors { errors, meta } => {
                let errors = errors.iter().map(ErrorObject::to_value).collect();
                out.insert("errors".to_string(), Value::Array(errors));
                if let Some(meta) = meta {
                    out.insert("meta".to_string(), Value::Object(meta.clone()));
                }
            }
        }
        Value::Object(out)
    }
}

fn write_common(
    out: &mut Map<String, Value>,
    included: &[ResourceObject],
    links: Option<&Links>,
    meta: Option<&Meta>,
) {
    if !included.is_empty() {
        let included = included.iter().map(ResourceObject::to_value).collect();
        out.insert("included".to_string(), Value::Array(included));
    }
    if let Some(links) = links {
        out.insert("links".to_string(), links.to_value());
    }
    if let Some(meta) = meta {
        out.insert("meta".to_string(), Value::Object(meta.clone()));
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_document_variants() {
        let single = Document::from_value(&json!({"data": {"type": "blogs", "id": "1"}})).unwrap();
        assert!(matches!(single, Document::Single { data: Some(_), .. }));

        let empty = Document::from_value(&json!({"data": null})).unwrap();
        assert!(matches!(empty, Document::Single { data: None, .. }));

        let many = Document::from_value(&json!({"data": []})).unwrap();
        assert!(matches!(many, Document::Collection { ref data, .. } if data.is_empty()));

        let errors = Document::from_value(&json!({"errors": [{"title": "bad"}]})).unwrap();
        assert!(matches!(errors, Document::Errors { ref errors, .. } if errors.len() == 1));
    }

    #[test]
    fn missing_data_and_errors_is_rejected() {
        let err = Document::from_value(&json!({"meta": {}})).unwrap_err();
        assert!(matches!(err, DocumentError::MissingPrimaryData));
        assert!(Document::from_value(&json!([])).is_err());
    }

    #[test]
    fn empty_included_is_omitted() {
        let doc = Document::single(ResourceObject::new("blogs", "1"));
        assert_eq!(doc.to_value(), json!({"data": {"type": "blogs", "id": "1"}}));
    }

    #[test]
    fn document_links_and_meta_are_emitted() {
        let mut meta = Meta::new();
        meta.insert("total".to_string(), json!(1));
        let doc = Document::collection(vec![ResourceObject::new("blogs", "1")])
            .with_links(Links::new().href("self", "/blogs"))
            .with_meta(meta);
        assert_eq!(
            doc.to_value(),
            json!({
                "data": [{"type": "blogs", "id": "1"}],
                "links": {"self": "/blogs"},
                "meta": {"total": 1}
            })
        );
    }

    #[test]
    fn serde_roundtrip_through_text() {
        let text = r#"{"data":{"type":"posts","id":"1","attributes":{"title":"x"}},"included":[{"type":"comments","id":"2"}]}"#;
        let doc: Document = serde_json::from_str(text).unwrap();
        assert_eq!(doc.included().len(), 1);
        assert_eq!(serde_json::to_string(&doc).unwrap(), text);
    }
}
