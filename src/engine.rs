//! The traversal engine.
//!
//! [`Engine`] walks a host graph under a schema and assembles the output
//! document. What it does depends on the kind of target it is handed:
//!
//! - a keyed value map is copied through as-is;
//! - a collection is walked in order, each element keyed by
//!   [`index_for`](crate::index::index_for) and shaped by the collection's
//!   schema;
//! - a node is shaped field by field: every normalized schema entry is
//!   resolved, coerced, and stored under its display name.
//!
//! When no schema is given the engine looks one up by type name in the
//! [`Policy`]. A node with no schema at all produces an empty map.
//!
//! The engine keeps no state between calls and does not detect cycles: a
//! cyclic graph recurses until the stack runs out.

use crate::coerce::{classify, Coerced};
use crate::host::{Collection, CollectionRef, Node, NodeRef, Raw, Target};
use crate::index::{index_for, IndexKey};
use crate::resolve::resolve;
use crate::schema::{normalize, FieldSpec, Schema, Transformer};
use crate::{DocumentMap, Policy, QueryOptions, Result, Value};
use std::borrow::Cow;
use std::sync::Arc;

macro_rules! trace_query {
    ($engine:expr, $($arg:tt)+) => {
        if $engine.options.debug {
            tracing::debug!($($arg)+);
        }
    };
}

/// Builds documents from host graphs.
///
/// # Examples
///
/// ```rust
/// use page_query::memory::MemNode;
/// use page_query::{doc, Engine, QueryOptions, Policy, Schema};
///
/// let engine = Engine::new(QueryOptions::new().with_date_format("Y-m-d"), Policy::default());
/// let page = MemNode::new("Page")
///     .with_field("title", "Launch")
///     .with_field("created", 1_700_000_000i64)
///     .into_ref();
///
/// let document = engine
///     .build_document(&page, Some(&Schema::fields(["title#heading", "created"])))
///     .unwrap();
/// assert_eq!(document, doc!({ "heading": "Launch", "created": "2023-11-14" }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    options: QueryOptions,
    policy: Arc<Policy>,
}

impl Engine {
    #[must_use]
    pub fn new(options: QueryOptions, policy: Policy) -> Self {
        Self::with_shared_policy(options, Arc::new(policy))
    }

    /// Creates an engine over a policy shared with other engines.
    #[must_use]
    pub fn with_shared_policy(options: QueryOptions, policy: Arc<Policy>) -> Self {
        Engine { options, policy }
    }

    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Builds the document for `target` under `schema`.
    ///
    /// The whole schema, nested schemas included, is checked before the
    /// host is consulted.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSchema`](crate::Error::MalformedSchema) for a schema
    /// entry with an empty selector, and any host error raised on the way.
    pub fn build_document<'a>(
        &self,
        target: impl Into<Target<'a>>,
        schema: Option<&Schema>,
    ) -> Result<Value> {
        if let Some(schema) = schema {
            schema.validate()?;
        }
        self.traverse(target.into(), schema)
    }

    /// Builds the document for `target` and encodes it as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`Engine::build_document`] returns, plus
    /// [`Error::Encode`](crate::Error::Encode) if encoding fails.
    pub fn build_json<'a>(
        &self,
        target: impl Into<Target<'a>>,
        schema: Option<&Schema>,
    ) -> Result<String> {
        let document = self.build_document(target, schema)?;
        let text = if self.options.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }

    /// Builds a document from a call site's argument list, whose last argument is the schema.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::build_document`].
    pub fn build_from_args<'a>(
        &self,
        target: impl Into<Target<'a>>,
        args: &[Option<Schema>],
    ) -> Result<Value> {
        let schema = args.last().and_then(Option::as_ref);
        self.build_document(target, schema)
    }

    /// Traverses one target.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::build_document`].
    pub fn traverse(&self, target: Target<'_>, schema: Option<&Schema>) -> Result<Value> {
        match target {
            Target::Keyed(map) => Ok(Value::Object(map.to_map())),
            Target::Collection(collection) => self.traverse_collection(collection, schema),
            Target::Node(node) => self.traverse_node(node, schema),
        }
    }

    /// Turns a resolved value into document output.
    ///
    /// Integers that look like timestamps become dates, plain data passes
    /// through, and nodes or collections are traversed under the nested
    /// schema carried by `transformer`. A function transformer has already
    /// produced the value, so nested values it returns fall back to their
    /// default schemas.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::build_document`].
    pub fn coerce(
        &self,
        raw: &Raw,
        transformer: Option<&Transformer>,
        selector: &str,
    ) -> Result<Value> {
        match classify(raw, &self.options) {
            Coerced::Date(date) => {
                trace_query!(self, selector, value = ?raw, date = %date, "coerced timestamp");
                Ok(Value::String(date))
            }
            Coerced::Scalar(value) => Ok(value),
            Coerced::Nested(target) => {
                let nested = match transformer {
                    Some(Transformer::Nested(schema)) => Some(schema),
                    _ => None,
                };
                trace_query!(self, selector, kind = raw.kind(), "descending");
                self.traverse(target, nested)
            }
        }
    }

    fn traverse_collection(
        &self,
        collection: &dyn Collection,
        schema: Option<&Schema>,
    ) -> Result<Value> {
        let schema = self.schema_for(collection.type_name(), schema);
        let mut entries: Vec<(IndexKey, Value)> = Vec::new();

        for (position, node) in collection.nodes().enumerate() {
            let key = index_for(node.as_ref(), position, &self.policy)?;
            trace_query!(
                self,
                collection = collection.type_name(),
                element = node.type_name(),
                key = %key,
                "indexed element"
            );
            let value = self.traverse_node(node.as_ref(), schema.as_deref())?;
            entries.push((key, value));
        }

        let positional = entries
            .iter()
            .enumerate()
            .all(|(position, (key, _))| *key == IndexKey::Position(position));
        if positional {
            return Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()));
        }

        let mut document = DocumentMap::with_capacity(entries.len());
        for (key, value) in entries {
            document.insert(key.to_string(), value);
        }
        Ok(Value::Object(document))
    }

    fn traverse_node(&self, node: &dyn Node, schema: Option<&Schema>) -> Result<Value> {
        let schema = match self.schema_for(node.type_name(), schema) {
            Some(schema) => schema,
            None => {
                trace_query!(self, type_name = node.type_name(), "no schema");
                return Ok(Value::Object(DocumentMap::new()));
            }
        };

        let fields = normalize(&schema)?;
        let mut document = DocumentMap::with_capacity(fields.len());

        for spec in &fields {
            match spec {
                FieldSpec::WholeNode(transform) => {
                    let value = match transform.apply(node)? {
                        Some(raw) => self.whole_node_value(&raw)?,
                        None => Value::Null,
                    };
                    document.insert(self.options.whole_node_key.clone(), value);
                }
                FieldSpec::Field {
                    selector,
                    display_name,
                    transformer,
                } => {
                    let value = match resolve(node, selector, *transformer)? {
                        Some(resolved) => {
                            trace_query!(self, selector, source = %resolved.source, "resolved");
                            self.coerce(&resolved.value, *transformer, selector)?
                        }
                        None => {
                            trace_query!(self, selector, type_name = node.type_name(), "unresolved");
                            Value::Null
                        }
                    };
                    document.insert(display_name.to_string(), value);
                }
            }
        }

        Ok(Value::Object(document))
    }

    /// A whole-node result is stored as returned: no timestamp detection,
    /// and nested values take their default schemas.
    fn whole_node_value(&self, raw: &Raw) -> Result<Value> {
        match raw.as_target() {
            Some(target) => self.traverse(target, None),
            None => Ok(raw.to_scalar().unwrap_or(Value::Null)),
        }
    }

    /// The caller's schema if it is non-empty, else the default for `type_name`.
    fn schema_for<'s>(&self, type_name: &str, schema: Option<&'s Schema>) -> Option<Cow<'s, Schema>> {
        match schema {
            Some(schema) if !schema.is_empty() => Some(Cow::Borrowed(schema)),
            _ => {
                let selectors = self.policy.default_schema(type_name)?;
                trace_query!(self, type_name, ?selectors, "default schema");
                Some(Cow::Owned(Schema::fields(selectors.iter().cloned())))
            }
        }
    }
}

/// Query shorthands on host handles, mirroring the two call sites hosts register.
pub trait QueryExt {
    /// # Errors
    ///
    /// Same as [`Engine::build_document`].
    fn query_document(&self, engine: &Engine, schema: Option<&Schema>) -> Result<Value>;

    /// # Errors
    ///
    /// Same as [`Engine::build_json`].
    fn query_json(&self, engine: &Engine, schema: Option<&Schema>) -> Result<String>;
}

impl QueryExt for NodeRef {
    fn query_document(&self, engine: &Engine, schema: Option<&Schema>) -> Result<Value> {
        engine.build_document(self, schema)
    }

    fn query_json(&self, engine: &Engine, schema: Option<&Schema>) -> Result<String> {
        engine.build_json(self, schema)
    }
}

impl QueryExt for CollectionRef {
    fn query_document(&self, engine: &Engine, schema: Option<&Schema>) -> Result<Value> {
        engine.build_document(self, schema)
    }

    fn query_json(&self, engine: &Engine, schema: Option<&Schema>) -> Result<String> {
        engine.build_json(self, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemCollection, MemNode};
    use crate::{doc, Error};

    fn engine() -> Engine {
        Engine::new(QueryOptions::new().with_date_format("Y-m-d"), Policy::default())
    }

    #[test]
    fn test_missing_schema_is_empty() {
        let node = MemNode::new("Page").with_field("title", "x").into_ref();
        assert_eq!(engine().build_document(&node, None).unwrap(), doc!({}));
    }

    #[test]
    fn test_empty_schema_falls_back_to_default() {
        let user = MemNode::new("User")
            .with_field("name", "ada")
            .with_field("email", "ada@example.com")
            .into_ref();
        let expected = doc!({ "name": "ada", "email": "ada@example.com" });
        assert_eq!(engine().build_document(&user, None).unwrap(), expected);
        assert_eq!(
            engine().build_document(&user, Some(&Schema::new())).unwrap(),
            expected
        );
    }

    #[test]
    fn test_whole_node_transform() {
        let node = MemNode::new("Page").with_field("title", "Home").into_ref();
        let schema = Schema::transform(|node| node.field("title"));
        assert_eq!(
            engine().build_document(&node, Some(&schema)).unwrap(),
            doc!({ "value": "Home" })
        );

        let engine = Engine::new(
            QueryOptions::new().with_whole_node_key("title"),
            Policy::default(),
        );
        assert_eq!(
            engine.build_document(&node, Some(&schema)).unwrap(),
            doc!({ "title": "Home" })
        );
    }

    #[test]
    fn test_whole_node_result_is_not_coerced() {
        let node = MemNode::new("Page")
            .with_field("created", 1_700_000_000i64)
            .with_field("author", MemNode::new("User").with_field("name", "ada"))
            .into_ref();

        let schema = Schema::transform(|node| node.field("created"));
        assert_eq!(
            engine().build_document(&node, Some(&schema)).unwrap(),
            doc!({ "value": 1_700_000_000i64 })
        );

        let schema = Schema::transform(|node| node.field("author"));
        assert_eq!(
            engine().build_document(&node, Some(&schema)).unwrap(),
            doc!({ "value": { "name": "ada", "email": null } })
        );
    }

    #[test]
    fn test_function_result_node_uses_default_schema() {
        let node = MemNode::new("Page")
            .with_field(
                "author",
                MemNode::new("User").with_field("name", "ada").with_field("email", "a@b"),
            )
            .into_ref();
        let schema = Schema::new().map("writer", |node| node.field("author"));
        assert_eq!(
            engine().build_document(&node, Some(&schema)).unwrap(),
            doc!({ "writer": { "name": "ada", "email": "a@b" } })
        );
    }

    #[test]
    fn test_malformed_entry_fails() {
        let node = MemNode::new("Page").into_ref();
        let err = engine()
            .build_document(&node, Some(&Schema::fields(["#x"])))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_malformed_nested_entry_fails_before_traversal() {
        let node = MemNode::new("Page").with_field("title", "x").into_ref();
        let schema = Schema::new().nest("title", Schema::fields(["#bad"]));
        let err = engine().build_document(&node, Some(&schema)).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { ref entry, .. } if entry == "#bad"));

        let pages = MemCollection::new("PageArray").into_ref();
        let err = engine()
            .build_document(&pages, Some(&Schema::fields(["#bad"])))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_labelled_collection_is_object() {
        let pages = MemCollection::new("PageArray")
            .with_node(MemNode::new("Page").with_field("name", "home"))
            .with_node(MemNode::new("Page"))
            .into_ref();
        let schema = Schema::fields(["name"]);
        assert_eq!(
            engine().build_document(&pages, Some(&schema)).unwrap(),
            doc!({ "home": { "name": "home" }, "1": { "name": null } })
        );
    }

    #[test]
    fn test_empty_collection_is_empty_array() {
        let pages = MemCollection::new("PageArray").into_ref();
        assert_eq!(engine().build_document(&pages, None).unwrap(), doc!([]));
    }

    #[test]
    fn test_build_from_args_uses_last() {
        let node = MemNode::new("Page")
            .with_field("title", "Home")
            .with_field("name", "home")
            .into_ref();
        let args = vec![Some(Schema::fields(["title"])), Some(Schema::fields(["name"]))];
        assert_eq!(
            engine().build_from_args(&node, &args).unwrap(),
            doc!({ "name": "home" })
        );
        assert_eq!(engine().build_from_args(&node, &[]).unwrap(), doc!({}));
    }
}
