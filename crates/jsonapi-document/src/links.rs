//! Links and meta members.
//!
//! A links member maps names to either a bare URL string or a link object
//! `{"href": ..., "meta": {...}}`. Values are held as raw JSON so that
//! capability hooks can hand back arbitrary shapes; [`Links::validate`] is the
//! gate that rejects anything the wire format cannot carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Free-form meta member.
pub type Meta = Map<String, Value>;

/// A link object with an `href` and optional meta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn to_value(&self) -> Value {
        // A string and a map of values always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// An ordered links member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(Map<String, Value>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bare URL link.
    pub fn href(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.0.insert(name.into(), Value::String(href.into()));
        self
    }

    /// Adds a link object.
    pub fn link(mut self, name: impl Into<String>, link: Link) -> Self {
        self.0.insert(name.into(), link.to_value());
        self
    }

    /// Inserts an unchecked value. Use [`Links::validate`] before emitting.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Checks that every entry is a URL string or a link object whose `href`
    /// is a string and whose `meta`, if present, is an object.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (name, value) in &self.0 {
            let reason = match value {
                Value::String(_) => continue,
                Value::Object(obj) => match (obj.get("href"), obj.get("meta")) {
                    (Some(Value::String(_)), None | Some(Value::Object(_))) => continue,
                    (Some(Value::String(_)), Some(_)) => "link meta must be an object",
                    _ => "link object requires a string `href`",
                },
                _ => "link must be a string or a link object",
            };
            return Err(DocumentError::InvalidLink {
                name: name.clone(),
                reason,
            });
        }
        Ok(())
    }

    pub(crate) fn from_value(value: &Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            _ => Err(DocumentError::member("links", "an object")),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Links {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub(crate) fn meta_from_value(value: &Value) -> Result<Meta, DocumentError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(DocumentError::member("meta", "an object")),
    }
}
