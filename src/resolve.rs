//! Field resolution with structural fallbacks.
//!
//! A selector is first looked up as a field. When the node has no such
//! field the selector is tried, in this order, as
//!
//! 1. the name of a direct child,
//! 2. the template name of a group of children,
//! 3. a host filter expression over the children.
//!
//! The first lookup that yields something wins. A function transformer
//! replaces the whole chain: its result is the value.

use crate::host::{Node, Raw};
use crate::schema::Transformer;
use crate::Result;
use std::fmt;

/// Which lookup produced a resolved value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Transform,
    Field,
    ChildByName,
    ChildrenByTemplate,
    ChildrenBySelector,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Transform => "transform",
            Source::Field => "field",
            Source::ChildByName => "child by name",
            Source::ChildrenByTemplate => "children by template",
            Source::ChildrenBySelector => "children by selector",
        })
    }
}

/// A value together with the lookup that found it.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub source: Source,
    pub value: Raw,
}

impl Resolved {
    fn new(source: Source, value: Raw) -> Self {
        Resolved { source, value }
    }
}

/// Resolves `selector` on `node`.
///
/// Returns `Ok(None)` when every lookup comes back empty.
///
/// # Errors
///
/// Host errors from any lookup, or from the transform, are returned as-is.
pub fn resolve(
    node: &dyn Node,
    selector: &str,
    transformer: Option<&Transformer>,
) -> Result<Option<Resolved>> {
    if let Some(Transformer::Function(transform)) = transformer {
        return Ok(transform
            .apply(node)?
            .map(|value| Resolved::new(Source::Transform, value)));
    }

    if let Some(value) = node.field(selector)? {
        return Ok(Some(Resolved::new(Source::Field, value)));
    }
    if let Some(child) = node.child_by_name(selector)? {
        return Ok(Some(Resolved::new(Source::ChildByName, Raw::Node(child))));
    }
    if let Some(children) = node.children_by_template(selector)? {
        return Ok(Some(Resolved::new(
            Source::ChildrenByTemplate,
            Raw::Collection(children),
        )));
    }
    Ok(node
        .children_by_selector(selector)?
        .map(|children| Resolved::new(Source::ChildrenBySelector, Raw::Collection(children))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemNode;
    use crate::schema::Transform;
    use crate::Error;

    fn page() -> MemNode {
        MemNode::new("Page")
            .with_field("title", "Home")
            .with_child(MemNode::new("Page").with_field("name", "about"))
            .with_child(
                MemNode::new("Page")
                    .with_template("news-item")
                    .with_field("name", "launch"),
            )
    }

    #[test]
    fn test_field_wins() {
        let resolved = resolve(&page(), "title", None).unwrap().unwrap();
        assert_eq!(resolved.source, Source::Field);
        assert!(matches!(resolved.value, Raw::String(ref s) if s == "Home"));
    }

    #[test]
    fn test_child_by_name_fallback() {
        let resolved = resolve(&page(), "about", None).unwrap().unwrap();
        assert_eq!(resolved.source, Source::ChildByName);
        assert!(matches!(resolved.value, Raw::Node(_)));
    }

    #[test]
    fn test_children_by_template_fallback() {
        let resolved = resolve(&page(), "news-item", None).unwrap().unwrap();
        assert_eq!(resolved.source, Source::ChildrenByTemplate);
        match resolved.value {
            Raw::Collection(children) => assert_eq!(children.nodes().count(), 1),
            other => panic!("Expected collection, got {:?}", other),
        }
    }

    #[test]
    fn test_children_by_selector_fallback() {
        let resolved = resolve(&page(), "name=launch", None).unwrap().unwrap();
        assert_eq!(resolved.source, Source::ChildrenBySelector);
    }

    #[test]
    fn test_everything_absent() {
        assert!(resolve(&page(), "missing", None).unwrap().is_none());
    }

    #[test]
    fn test_function_bypasses_lookup() {
        let transformer = Transformer::Function(Transform::new(|_| Ok(Some(Raw::from(7)))));
        let resolved = resolve(&page(), "title", Some(&transformer)).unwrap().unwrap();
        assert_eq!(resolved.source, Source::Transform);
        assert!(matches!(resolved.value, Raw::Integer(7)));

        let absent = Transformer::Function(Transform::new(|_| Ok(None)));
        assert!(resolve(&page(), "title", Some(&absent)).unwrap().is_none());
    }

    #[test]
    fn test_host_errors_propagate() {
        let transformer =
            Transformer::Function(Transform::new(|_| Err(Error::host("rejected"))));
        let err = resolve(&page(), "title", Some(&transformer)).unwrap_err();
        assert!(matches!(err, Error::Host(_)));

        let err = resolve(&page(), "bad[selector", None).unwrap_err();
        assert!(matches!(err, Error::Host(_)));
    }

    #[test]
    fn test_nested_schema_does_not_bypass_lookup() {
        let transformer = Transformer::Nested(crate::Schema::fields(["title"]));
        let resolved = resolve(&page(), "title", Some(&transformer)).unwrap().unwrap();
        assert_eq!(resolved.source, Source::Field);
    }
}
