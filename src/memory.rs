//! An in-memory host object model.
//!
//! [`MemNode`] and [`MemCollection`] implement the [`Node`] and
//! [`Collection`] contracts over plain owned data. They back the crate's
//! tests and demos and serve embedders whose data is already in memory.
//!
//! Children are addressed the same three ways a page tree addresses them:
//!
//! - by name: the child whose `name` field equals the selector
//! - by template: all children whose template name equals the selector
//! - by filter expression: `field=value` clauses joined by `,`, all of which
//!   must hold
//!
//! ```rust
//! use page_query::memory::{MemCollection, MemNode};
//! use page_query::{Engine, Schema, doc};
//!
//! let home = MemNode::new("Page")
//!     .with_field("title", "Home")
//!     .with_child(MemNode::new("Page").with_field("name", "about").with_field("title", "About"))
//!     .into_ref();
//!
//! let engine = Engine::default();
//! let schema = Schema::new().field("title").nest("about", Schema::fields(["title"]));
//! let document = engine.build_document(&home, Some(&schema)).unwrap();
//! assert_eq!(document, doc!({ "title": "Home", "about": { "title": "About" } }));
//! ```

use crate::host::{Collection, CollectionRef, KeyedValueMap, Node, NodeRef, Raw, Target};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Collection type name used for children found through addressing.
pub const CHILDREN_TYPE_NAME: &str = "PageArray";

/// An owned node with ordered fields and child nodes.
#[derive(Clone, Debug)]
pub struct MemNode {
    type_name: String,
    template: Option<String>,
    fields: IndexMap<String, Raw>,
    children: Vec<Arc<MemNode>>,
}

impl MemNode {
    pub fn new(type_name: impl Into<String>) -> Self {
        MemNode {
            type_name: type_name.into(),
            template: None,
            fields: IndexMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets a field. Later calls for the same name replace the value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Raw>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: MemNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    #[must_use]
    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    fn children_where<P>(&self, predicate: P) -> Option<CollectionRef>
    where
        P: Fn(&MemNode) -> bool,
    {
        let matched: Vec<NodeRef> = self
            .children
            .iter()
            .filter(|child| predicate(child))
            .map(|child| Arc::clone(child) as NodeRef)
            .collect();
        if matched.is_empty() {
            None
        } else {
            Some(Arc::new(MemCollection::from_refs(CHILDREN_TYPE_NAME, matched)))
        }
    }

    fn field_matches(&self, name: &str, expected: &str) -> bool {
        match self.fields.get(name) {
            Some(Raw::String(s)) => s == expected,
            Some(Raw::Integer(i)) => i.to_string() == expected,
            Some(Raw::Bool(b)) => b.to_string() == expected,
            _ => false,
        }
    }
}

impl Node for MemNode {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn template_name(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn field(&self, name: &str) -> Result<Option<Raw>> {
        Ok(self.fields.get(name).cloned())
    }

    fn child_by_name(&self, name: &str) -> Result<Option<NodeRef>> {
        Ok(self
            .children
            .iter()
            .find(|child| child.field_matches("name", name))
            .map(|child| Arc::clone(child) as NodeRef))
    }

    fn children_by_template(&self, template: &str) -> Result<Option<CollectionRef>> {
        Ok(self.children_where(|child| child.template.as_deref() == Some(template)))
    }

    fn children_by_selector(&self, expr: &str) -> Result<Option<CollectionRef>> {
        let clauses = parse_filter(expr)?;
        if clauses.is_empty() {
            return Ok(None);
        }
        Ok(self.children_where(|child| {
            clauses
                .iter()
                .all(|(field, value)| child.field_matches(field, value))
        }))
    }
}

/// Parses `field=value[,field=value...]`.
///
/// An expression with no `=` is not a filter and yields no clauses; brackets
/// and empty field names are rejected.
fn parse_filter(expr: &str) -> Result<Vec<(&str, &str)>> {
    if expr.contains(|c: char| c == '[' || c == ']') {
        return Err(Error::host(format!("invalid selector expression {:?}", expr)));
    }
    if !expr.contains('=') {
        return Ok(Vec::new());
    }
    expr.split(',')
        .map(|clause| match clause.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value.trim())),
            _ => Err(Error::host(format!("invalid selector clause {:?}", clause))),
        })
        .collect()
}

impl From<MemNode> for Raw {
    fn from(node: MemNode) -> Self {
        Raw::Node(node.into_ref())
    }
}

impl<'a> From<&'a MemNode> for Target<'a> {
    fn from(node: &'a MemNode) -> Self {
        Target::Node(node)
    }
}

/// An owned, ordered collection of nodes.
#[derive(Clone)]
pub struct MemCollection {
    type_name: String,
    nodes: Vec<NodeRef>,
}

impl MemCollection {
    pub fn new(type_name: impl Into<String>) -> Self {
        MemCollection {
            type_name: type_name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn from_refs(type_name: impl Into<String>, nodes: Vec<NodeRef>) -> Self {
        MemCollection {
            type_name: type_name.into(),
            nodes,
        }
    }

    #[must_use]
    pub fn with_node(mut self, node: MemNode) -> Self {
        self.nodes.push(node.into_ref());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn into_ref(self) -> CollectionRef {
        Arc::new(self)
    }
}

impl Collection for MemCollection {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeRef> + '_> {
        Box::new(self.nodes.iter().cloned())
    }
}

impl From<MemCollection> for Raw {
    fn from(collection: MemCollection) -> Self {
        Raw::Collection(collection.into_ref())
    }
}

impl<'a> From<&'a MemCollection> for Target<'a> {
    fn from(collection: &'a MemCollection) -> Self {
        Target::Collection(collection)
    }
}

impl std::fmt::Debug for MemCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemCollection")
            .field("type_name", &self.type_name)
            .field("len", &self.nodes.len())
            .finish()
    }
}

/// Shorthand for a keyed map of translations, keyed by language.
pub fn translations<I, K, V>(pairs: I) -> KeyedValueMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<crate::Value>,
{
    pairs
        .into_iter()
        .fold(KeyedValueMap::new(), |map, (key, value)| map.with(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MemNode {
        MemNode::new("Page")
            .with_child(
                MemNode::new("Page")
                    .with_template("article")
                    .with_field("name", "one")
                    .with_field("featured", true),
            )
            .with_child(
                MemNode::new("Page")
                    .with_template("article")
                    .with_field("name", "two")
                    .with_field("featured", false),
            )
            .with_child(MemNode::new("Page").with_field("name", "contact"))
    }

    #[test]
    fn test_child_by_name() {
        let child = tree().child_by_name("contact").unwrap().unwrap();
        assert!(child.field("name").unwrap().is_some());
        assert!(tree().child_by_name("nobody").unwrap().is_none());
    }

    #[test]
    fn test_children_by_template() {
        let articles = tree().children_by_template("article").unwrap().unwrap();
        assert_eq!(articles.nodes().count(), 2);
        assert_eq!(articles.type_name(), CHILDREN_TYPE_NAME);
        assert!(tree().children_by_template("event").unwrap().is_none());
    }

    #[test]
    fn test_children_by_selector() {
        let featured = tree()
            .children_by_selector("template=ignored,featured=true")
            .unwrap();
        assert!(featured.is_none());

        let featured = tree().children_by_selector("featured=true").unwrap().unwrap();
        assert_eq!(featured.nodes().count(), 1);

        assert!(tree().children_by_selector("plainword").unwrap().is_none());
        assert!(tree().children_by_selector("a[0]").is_err());
        assert!(tree().children_by_selector("=x").is_err());
    }

    #[test]
    fn test_translations() {
        let map = translations([("default", "Hello"), ("de", "Hallo")]);
        let keys: Vec<_> = map.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["default", "de"]);
    }
}
