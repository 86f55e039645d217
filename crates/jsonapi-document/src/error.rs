use thiserror::Error;

/// Errors raised while reading or validating wire document shapes.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{context} must be a JSON object")]
    NotAnObject { context: &'static str },

    #[error("member `{member}` must be {expected}")]
    InvalidMember {
        member: &'static str,
        expected: &'static str,
    },

    #[error("document must contain either `data` or `errors`")]
    MissingPrimaryData,

    #[error("invalid link `{name}`: {reason}")]
    InvalidLink { name: String, reason: &'static str },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    pub(crate) fn member(member: &'static str, expected: &'static str) -> Self {
        Self::InvalidMember { member, expected }
    }
}
