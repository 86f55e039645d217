//! Error objects for the top-level `errors` member.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;
use crate::links::Meta;

/// Where in the request an error originated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer into the request document, e.g. `/data/attributes/title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the query parameter that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// A single entry of an error document. Absent members are not emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ErrorLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ErrorObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source.get_or_insert_with(ErrorSource::default).pointer = Some(pointer.into());
        self
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject {
                context: "error object",
            });
        }
        Ok(Self::deserialize(value)?)
    }

    pub fn to_value(&self) -> Value {
        // Every member is a string, a string map, or a JSON object.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Error: {} {}",
            self.title.as_deref().unwrap_or_default(),
            self.detail.as_deref().unwrap_or_default()
        )
    }
}

impl std::error::Error for ErrorObject {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_title_and_detail() {
        let err = ErrorObject::new()
            .with_title("Title test.")
            .with_detail("Detail test.");
        assert_eq!(err.to_string(), "Error: Title test. Detail test.\n");
    }

    #[test]
    fn only_present_members_are_emitted() {
        let err = ErrorObject {
            id: Some("0".to_string()),
            status: Some("400".to_string()),
            code: Some("E1100".to_string()),
            ..ErrorObject::default()
        };
        assert_eq!(
            err.to_value(),
            json!({"id": "0", "status": "400", "code": "E1100"})
        );
    }

    #[test]
    fn pointer_builder_creates_source() {
        let err = ErrorObject::new().with_pointer("/data/attributes/title");
        assert_eq!(
            err.to_value(),
            json!({"source": {"pointer": "/data/attributes/title"}})
        );
    }
}
