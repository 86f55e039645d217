//! Resource objects and resource identifiers.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::links::{meta_from_value, Links, Meta};
use crate::relationship::RelationshipNode;

/// Minimal `(type, id)` reference to a resource.
///
/// Two identifiers name the same resource iff both strings match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIdentifier {
    pub type_: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(type_: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            id: id.into(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::NotAnObject {
            context: "resource identifier",
        })?;
        Ok(Self {
            type_: string_member(obj, "type")?.unwrap_or_default(),
            id: string_member(obj, "id")?.unwrap_or_default(),
        })
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::String(self.type_.clone()));
        out.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(out)
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.type_, self.id)
    }
}

/// Wire representation of one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceObject {
    pub type_: String,
    /// Empty for resources that have not been created yet.
    pub id: String,
    pub client_id: Option<String>,
    pub attributes: Map<String, Value>,
    pub relationships: IndexMap<String, RelationshipNode>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

impl ResourceObject {
    pub fn new(type_: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    /// A resource carrying nothing but an identifier, used when a linkage
    /// target is missing from `included`.
    pub fn stub(identifier: &ResourceIdentifier) -> Self {
        Self::new(identifier.type_.clone(), identifier.id.clone())
    }

    /// A type-less resource wrapping a plain attribute map. Nested value
    /// records are decoded through this.
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.type_.clone(), self.id.clone())
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::NotAnObject {
            context: "resource object",
        })?;

        let mut resource = Self {
            type_: string_member(obj, "type")?.unwrap_or_default(),
            id: string_member(obj, "id")?.unwrap_or_default(),
            client_id: string_member(obj, "client-id")?,
            ..Self::default()
        };

        match obj.get("attributes") {
            None | Some(Value::Null) => {}
            Some(Value::Object(attrs)) => resource.attributes = attrs.clone(),
            Some(_) => return Err(DocumentError::member("attributes", "an object")),
        }

        match obj.get("relationships") {
            None | Some(Value::Null) => {}
            Some(Value::Object(rels)) => {
                for (name, node) in rels {
                    resource
                        .relationships
                        .insert(name.clone(), RelationshipNode::from_value(node)?);
                }
            }
            Some(_) => return Err(DocumentError::member("relationships", "an object")),
        }

        if let Some(links) = obj.get("links").filter(|v| !v.is_null()) {
            resource.links = Some(Links::from_value(links)?);
        }
        if let Some(meta) = obj.get("meta").filter(|v| !v.is_null()) {
            resource.meta = Some(meta_from_value(meta)?);
        }
        Ok(resource)
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::String(self.type_.clone()));
        if !self.id.is_empty() {
            out.insert("id".to_string(), Value::String(self.id.clone()));
        }
        if let Some(client_id) = &self.client_id {
            out.insert("client-id".to_string(), Value::String(client_id.clone()));
        }
        if !self.attributes.is_empty() {
            out.insert(
                "attributes".to_string(),
                Value::Object(self.attributes.clone()),
            );
        }
        if !self.relationships.is_empty() {
            let rels = self
                .relationships
                .iter()
                .map(|(name, node)| (name.clone(), node.to_value()))
                .collect();
            out.insert("relationships".to_string(), Value::Object(rels));
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

pub(crate) fn string_member(
    obj: &Map<String, Value>,
    member: &'static str,
) -> Result<Option<String>, DocumentError> {
    match obj.get(member) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DocumentError::member(member, "a string")),
    }
}
