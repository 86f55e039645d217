//! JSON:API wire document model.
//!
//! Plain data for the shapes that travel on the wire: top-level [`Document`]s,
//! [`ResourceObject`]s, [`RelationshipNode`]s with their [`Linkage`], and
//! [`ErrorObject`]s. Every shape converts to and from `serde_json::Value`;
//! [`Document`] also implements `Serialize`/`Deserialize`.
//!
//! # Example
//!
//! ```
//! use jsonapi_document::{Document, Linkage, ResourceIdentifier};
//!
//! let doc = Document::from_str(r#"{
//!     "data": {
//!         "type": "blogs",
//!         "id": "1",
//!         "relationships": {"posts": {"data": [{"type": "posts", "id": "2"}]}}
//!     }
//! }"#).unwrap();
//!
//! let Document::Single { data: Some(blog), .. } = doc else { unreachable!() };
//! assert_eq!(
//!     blog.relationships["posts"].data,
//!     Some(Linkage::Many(vec![ResourceIdentifier::new("posts", "2")]))
//! );
//! ```

pub mod capability;
pub mod document;
pub mod error;
pub mod error_object;
pub mod links;
pub mod relationship;
pub mod resource;

pub use capability::{Linkable, MetaProvider, RelationshipLinkable, RelationshipMetaProvider};
pub use document::Document;
pub use error::DocumentError;
pub use error_object::{ErrorLinks, ErrorObject, ErrorSource};
pub use links::{Link, Links, Meta};
pub use relationship::{Linkage, RelationshipNode};
pub use resource::{ResourceIdentifier, ResourceObject};
