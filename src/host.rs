//! The capability contract between the query engine and a host object model.
//!
//! The engine never owns the graph it walks. A host exposes its entities
//! through two traits:
//!
//! - [`Node`]: a single addressable entity with named fields and, optionally,
//!   ways to address its children
//! - [`Collection`]: an ordered sequence of nodes
//!
//! Field lookups hand back [`Raw`] values, which are either plain data or
//! handles to further nodes and collections. Every lookup returns
//! `Result<Option<_>>`: `Ok(None)` means "not here" and lets the engine try
//! its next fallback, `Err` means the host rejected the request and is passed
//! straight back to the caller.
//!
//! The child-addressing methods have default implementations that report
//! absence, so a host only implements the strategies it supports.

use crate::{DocumentMap, Result, Value};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a host node.
pub type NodeRef = Arc<dyn Node>;

/// Shared handle to a host collection.
pub type CollectionRef = Arc<dyn Collection>;

/// A single entity in the host object graph.
pub trait Node {
    /// Stable short type identifier used for default-schema and index-policy lookups.
    fn type_name(&self) -> &str;

    /// A more specific identifier layered over [`Node::type_name`], such as a page template.
    fn template_name(&self) -> Option<&str> {
        None
    }

    /// Looks up an attribute by name.
    fn field(&self, name: &str) -> Result<Option<Raw>>;

    /// Addresses a direct child by its name.
    fn child_by_name(&self, _name: &str) -> Result<Option<NodeRef>> {
        Ok(None)
    }

    /// Addresses the children built from the named template.
    fn children_by_template(&self, _template: &str) -> Result<Option<CollectionRef>> {
        Ok(None)
    }

    /// Addresses children through a host-defined filter expression, used verbatim.
    fn children_by_selector(&self, _expr: &str) -> Result<Option<CollectionRef>> {
        Ok(None)
    }
}

/// An ordered sequence of nodes with stable iteration order.
pub trait Collection {
    fn type_name(&self) -> &str;

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeRef> + '_>;
}

/// An already-flat map of scalar values, such as the translations of one field.
///
/// The engine copies it through unchanged and never applies a schema to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyedValueMap(DocumentMap);

impl KeyedValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the entries as a document map.
    #[must_use]
    pub fn to_map(&self) -> DocumentMap {
        self.0.clone()
    }
}

/// A value handed back by a host lookup.
#[derive(Clone)]
pub enum Raw {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A plain, non-node sequence. Passed through without inspection.
    Array(Vec<Value>),
    Node(NodeRef),
    Collection(CollectionRef),
    Keyed(KeyedValueMap),
}

impl Raw {
    /// Short name of the value's kind, used in trace output.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Raw::Bool(_) => "bool",
            Raw::Integer(_) => "integer",
            Raw::Float(_) => "float",
            Raw::String(_) => "string",
            Raw::Array(_) => "array",
            Raw::Node(node) => node.type_name(),
            Raw::Collection(collection) => collection.type_name(),
            Raw::Keyed(_) => KEYED_TYPE_NAME,
        }
    }

    /// Borrows the value as a traversal target if it is a node, collection or keyed map.
    #[must_use]
    pub fn as_target(&self) -> Option<Target<'_>> {
        match self {
            Raw::Node(node) => Some(Target::Node(node.as_ref())),
            Raw::Collection(collection) => Some(Target::Collection(collection.as_ref())),
            Raw::Keyed(map) => Some(Target::Keyed(map)),
            _ => None,
        }
    }

    /// Converts plain data into a document value. Node-like values yield `None`.
    #[must_use]
    pub fn to_scalar(&self) -> Option<Value> {
        match self {
            Raw::Bool(b) => Some(Value::Bool(*b)),
            Raw::Integer(i) => Some(Value::from(*i)),
            Raw::Float(f) => Some(Value::from(*f)),
            Raw::String(s) => Some(Value::from(s.as_str())),
            Raw::Array(arr) => Some(Value::Array(arr.clone())),
            Raw::Node(_) | Raw::Collection(_) | Raw::Keyed(_) => None,
        }
    }
}

impl fmt::Debug for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Bool(b) => write!(f, "Bool({})", b),
            Raw::Integer(i) => write!(f, "Integer({})", i),
            Raw::Float(fl) => write!(f, "Float({})", fl),
            Raw::String(s) => write!(f, "String({:?})", s),
            Raw::Array(arr) => write!(f, "Array({:?})", arr),
            Raw::Node(node) => write!(f, "Node({})", node.type_name()),
            Raw::Collection(collection) => write!(f, "Collection({})", collection.type_name()),
            Raw::Keyed(map) => write!(f, "Keyed({:?})", map),
        }
    }
}

impl From<bool> for Raw {
    fn from(value: bool) -> Self {
        Raw::Bool(value)
    }
}

impl From<i32> for Raw {
    fn from(value: i32) -> Self {
        Raw::Integer(value as i64)
    }
}

impl From<i64> for Raw {
    fn from(value: i64) -> Self {
        Raw::Integer(value)
    }
}

impl From<f64> for Raw {
    fn from(value: f64) -> Self {
        Raw::Float(value)
    }
}

impl From<&str> for Raw {
    fn from(value: &str) -> Self {
        Raw::String(value.to_string())
    }
}

impl From<String> for Raw {
    fn from(value: String) -> Self {
        Raw::String(value)
    }
}

impl From<Vec<Value>> for Raw {
    fn from(value: Vec<Value>) -> Self {
        Raw::Array(value)
    }
}

impl From<NodeRef> for Raw {
    fn from(value: NodeRef) -> Self {
        Raw::Node(value)
    }
}

impl From<CollectionRef> for Raw {
    fn from(value: CollectionRef) -> Self {
        Raw::Collection(value)
    }
}

impl From<KeyedValueMap> for Raw {
    fn from(value: KeyedValueMap) -> Self {
        Raw::Keyed(value)
    }
}

/// Type name reported for keyed value maps.
pub const KEYED_TYPE_NAME: &str = "KeyedValueMap";

/// Something the engine can traverse.
#[derive(Clone, Copy)]
pub enum Target<'a> {
    Node(&'a dyn Node),
    Collection(&'a dyn Collection),
    Keyed(&'a KeyedValueMap),
}

impl<'a> Target<'a> {
    #[must_use]
    pub fn type_name(&self) -> &'a str {
        match self {
            Target::Node(node) => node.type_name(),
            Target::Collection(collection) => collection.type_name(),
            Target::Keyed(_) => KEYED_TYPE_NAME,
        }
    }
}

impl<'a> From<&'a dyn Node> for Target<'a> {
    fn from(node: &'a dyn Node) -> Self {
        Target::Node(node)
    }
}

impl<'a> From<&'a dyn Collection> for Target<'a> {
    fn from(collection: &'a dyn Collection) -> Self {
        Target::Collection(collection)
    }
}

impl<'a> From<&'a NodeRef> for Target<'a> {
    fn from(node: &'a NodeRef) -> Self {
        Target::Node(node.as_ref())
    }
}

impl<'a> From<&'a CollectionRef> for Target<'a> {
    fn from(collection: &'a CollectionRef) -> Self {
        Target::Collection(collection.as_ref())
    }
}

impl<'a> From<&'a KeyedValueMap> for Target<'a> {
    fn from(map: &'a KeyedValueMap) -> Self {
        Target::Keyed(map)
    }
}
