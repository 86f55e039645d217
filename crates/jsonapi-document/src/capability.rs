//! Optional hooks a record type can implement to decorate its wire form.
//!
//! The encoder consults these only when a record advertises them; a record
//! without a hook simply gets no `links`/`meta` member.

use crate::links::{Links, Meta};

/// Top-level links for a resource object.
pub trait Linkable {
    fn links(&self) -> Option<Links>;
}

/// Links for one named relationship of a resource object.
pub trait RelationshipLinkable {
    fn relationship_links(&self, relation: &str) -> Option<Links>;
}

/// Meta for a resource object.
pub trait MetaProvider {
    fn meta(&self) -> Option<Meta>;
}

/// Meta for one named relationship of a resource object.
pub trait RelationshipMetaProvider {
    fn relationship_meta(&self, relation: &str) -> Option<Meta>;
}
