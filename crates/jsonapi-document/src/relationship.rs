//! Relationship nodes and resource linkage.

use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::links::{meta_from_value, Links, Meta};
use crate::resource::ResourceIdentifier;

/// Resource linkage carried in a relationship's `data` member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linkage {
    /// To-one linkage. `None` is an explicit `null`, which disassociates.
    One(Option<ResourceIdentifier>),
    /// To-many linkage, in wire order.
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        match value {
            Value::Null => Ok(Self::One(None)),
            Value::Object(_) => Ok(Self::One(Some(ResourceIdentifier::from_value(value)?))),
            Value::Array(items) => items
                .iter()
                .map(ResourceIdentifier::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            _ => Err(DocumentError::member(
                "data",
                "null, a resource identifier, or an array of identifiers",
            )),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::One(None) => Value::Null,
            Self::One(Some(id)) => id.to_value(),
            Self::Many(ids) => Value::Array(ids.iter().map(ResourceIdentifier::to_value).collect()),
        }
    }
}

/// A named relationship of a resource object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipNode {
    /// `None` when the `data` member is absent altogether.
    pub data: Option<Linkage>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

impl RelationshipNode {
    pub fn new(data: Linkage) -> Self {
        Self {
            data: Some(data),
            links: None,
            meta: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::NotAnObject {
            context: "relationship",
        })?;
        let mut node = Self {
            data: obj.get("data").map(Linkage::from_value).transpose()?,
            ..Self::default()
        };
        if let Some(links) = obj.get("links").filter(|v| !v.is_null()) {
            node.links = Some(Links::from_value(links)?);
        }
        if let Some(meta) = obj.get("meta").filter(|v| !v.is_null()) {
            node.meta = Some(meta_from_value(meta)?);
        }
        Ok(node)
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        if let Some(data) = &self.data {
            out.insert("data".to_string(), data.to_value());
        }
        if let Some(links) = &self.links {
            out.insert("links".to_string(), links.to_value());
        }
        if let Some(meta) = &self.meta {
            out.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn distinguishes_absent_null_and_present() {
        let absent = RelationshipNode::from_value(&json!({"links": {"self": "/x"}})).unwrap();
        assert_eq!(absent.data, None);
        assert!(absent.links.is_some());

        let null = RelationshipNode::from_value(&json!({"data": null})).unwrap();
        assert_eq!(null.data, Some(Linkage::One(None)));
        assert_eq!(null.to_value(), json!({"data": null}));

        let one = RelationshipNode::from_value(&json!({"data": {"type": "posts", "id": "1"}}))
            .unwrap();
        assert_eq!(
            one.data,
            Some(Linkage::One(Some(ResourceIdentifier::new("posts", "1"))))
        );
    }

    #[test]
    fn many_keeps_order() {
        let node = RelationshipNode::from_value(&json!({"data": [
            {"type": "comments", "id": "3"},
            {"type": "comments", "id": "1"},
            {"type": "comments", "id": "2"}
        ]}))
        .unwrap();
        let Some(Linkage::Many(ids)) = node.data else {
            panic!("expected to-many linkage");
        };
        let order: Vec<_> = ids.iter().map(|id| id.id.as_str()).collect();
        assert_eq!(order, ["3", "1", "2"]);
    }

    #[test]
    fn rejects_scalar_data() {
        assert!(RelationshipNode::from_value(&json!({"data": 5})).is_err());
        assert!(RelationshipNode::from_value(&json!("posts")).is_err());
    }
}
