//! # page_query
//!
//! Shape a tree of host nodes and collections into an ordered, JSON-ready
//! document, driven by a declarative and nestable query schema.
//!
//! ## What it does
//!
//! A host object model (pages, files, users, whatever the application has)
//! exposes its entities through the [`Node`] and [`Collection`] traits. A
//! [`Schema`] lists which selectors to read from a node and how to shape each
//! one. The [`Engine`] walks the graph, resolving selectors, turning
//! timestamp-like integers into dates, descending into child nodes and
//! collections, and returns a [`Value`] whose keys follow the schema's order.
//!
//! ## Key Features
//!
//! - **Ordered output**: keys come out in schema order
//! - **Aliases**: `"title#heading"` reads `title` and writes `heading`
//! - **Structural fallbacks**: a selector that is not a field is tried as a
//!   child name, a child template, then a child filter expression
//! - **Default schemas**: types such as `Pagefile` or `User` shape
//!   themselves when no schema is given
//! - **Index policy**: collection elements are keyed by name, id or position
//!
//! ## Quick Start
//!
//! ```rust
//! use page_query::memory::{MemCollection, MemNode};
//! use page_query::{build_json, Schema};
//!
//! let images = MemCollection::new("Pageimages")
//!     .with_node(MemNode::new("Pageimage").with_field("basename", "a.jpg").with_field("url", "/a.jpg"));
//!
//! let page = MemNode::new("Page")
//!     .with_field("name", "home")
//!     .with_field("title", "Home")
//!     .with_field("images", images)
//!     .into_ref();
//!
//! let schema = Schema::new()
//!     .field("title#heading")
//!     .nest("images", Schema::fields(["url"]));
//!
//! let json = build_json(&page, Some(&schema)).unwrap();
//! assert_eq!(json, r#"{"heading":"Home","images":[{"url":"/a.jpg"}]}"#);
//! ```
//!
//! ## Configuration
//!
//! [`QueryOptions`] holds the date format, time-zone offset, debug flag and
//! encoding style; [`Policy`] holds the default schemas and index tables.
//! Both are handed to [`Engine::new`]; nothing is read from global state.
//!
//! ## Logging
//!
//! With [`QueryOptions::debug`] set, the engine emits `tracing` debug events
//! for schema fallbacks, unresolved selectors, timestamp coercions and
//! collection keys. Logging never changes the document.

pub mod coerce;
pub mod datefmt;
pub mod engine;
pub mod error;
pub mod host;
pub mod index;
pub mod macros;
pub mod map;
pub mod memory;
pub mod options;
pub mod policy;
pub mod resolve;
pub mod schema;
pub mod value;

pub use engine::{Engine, QueryExt};
pub use error::{Error, Result};
pub use host::{Collection, CollectionRef, KeyedValueMap, Node, NodeRef, Raw, Target};
pub use map::DocumentMap;
pub use options::QueryOptions;
pub use policy::Policy;
pub use schema::{Schema, SchemaEntry, Transform, Transformer};
pub use value::{Number, Value};

/// Builds the document for `target` with default options and policy.
///
/// # Examples
///
/// ```rust
/// use page_query::memory::MemNode;
/// use page_query::{build_document, doc};
///
/// let user = MemNode::new("User").with_field("name", "ada").into_ref();
/// let document = build_document(&user, None).unwrap();
/// assert_eq!(document, doc!({ "name": "ada", "email": null }));
/// ```
///
/// # Errors
///
/// Returns an error for a malformed schema or a failing host lookup.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn build_document<'a>(target: impl Into<Target<'a>>, schema: Option<&Schema>) -> Result<Value> {
    Engine::default().build_document(target, schema)
}

/// Builds the document for `target` with default options and policy, encoded as JSON.
///
/// # Errors
///
/// Returns an error for a malformed schema, a failing host lookup, or an encoding failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn build_json<'a>(target: impl Into<Target<'a>>, schema: Option<&Schema>) -> Result<String> {
    Engine::default().build_json(target, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{translations, MemNode};

    #[test]
    fn test_build_document_defaults() {
        let marker = MemNode::new("MapMarker")
            .with_field("lat", 47.37)
            .with_field("lng", 8.54)
            .with_field("zoom", 12)
            .into_ref();
        let document = build_document(&marker, None).unwrap();
        assert_eq!(
            document,
            doc!({ "lat": 47.37, "lng": 8.54, "zoom": "1970-01-01 00:00:12", "address": null })
        );
    }

    #[test]
    fn test_build_json_keyed_map() {
        let title = translations([("default", "Hello"), ("de", "Hallo")]);
        let json = build_json(&title, Some(&Schema::fields(["ignored"]))).unwrap();
        assert_eq!(json, r#"{"default":"Hello","de":"Hallo"}"#);
    }
}
