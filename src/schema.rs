//! Query schemas and their normalization.
//!
//! A [`Schema`] says which selectors to read from a node and how to shape
//! each one. It is either
//!
//! - a list of [`SchemaEntry`] values, each a selector with an optional
//!   [`Transformer`] (a function or a nested schema), or
//! - a single whole-node [`Transform`], applied to the node itself rather
//!   than to one of its fields.
//!
//! A selector may carry a display alias after the first `#`:
//! `"title#heading"` reads `title` and writes `heading`. Without an alias the
//! output key is the selector with its first character lowercased.
//!
//! ```rust
//! use page_query::Schema;
//!
//! let schema = Schema::new()
//!     .field("title#heading")
//!     .field("Summary")
//!     .nest("children", Schema::fields(["title", "url"]));
//!
//! let names: Vec<_> = page_query::schema::normalize(&schema)
//!     .unwrap()
//!     .iter()
//!     .map(|spec| spec.display_name().to_string())
//!     .collect();
//! assert_eq!(names, vec!["heading", "summary", "children"]);
//! ```
//!
//! Schemas can also be declared as JSON, an array of selectors or an object
//! mapping selectors to `null` or a nested schema:
//!
//! ```rust
//! use page_query::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::from_json(&json!({
//!     "title": null,
//!     "images": ["url", "description#alt"]
//! }))
//! .unwrap();
//! assert_eq!(schema.len(), 2);
//! ```

use crate::host::{Node, Raw};
use crate::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(&dyn Node) -> Result<Option<Raw>> + Send + Sync;

/// A function computing a value from a node.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Node) -> Result<Option<Raw>> + Send + Sync + 'static,
    {
        Transform(Arc::new(f))
    }

    /// Runs the function against `node`.
    ///
    /// # Errors
    ///
    /// Whatever the function returns, typically host errors from lookups it makes.
    pub fn apply(&self, node: &dyn Node) -> Result<Option<Raw>> {
        (self.0)(node)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// How the value behind a selector is produced or decomposed.
#[derive(Clone, Debug)]
pub enum Transformer {
    /// Computes the value from the node, bypassing field lookup.
    Function(Transform),
    /// Schema applied when the value is itself a node or collection.
    Nested(Schema),
}

/// One selector of a field-list schema.
#[derive(Clone, Debug)]
pub struct SchemaEntry {
    /// Selector, optionally followed by `#displayName`.
    pub selector: String,
    pub transformer: Option<Transformer>,
}

impl SchemaEntry {
    pub fn new(selector: impl Into<String>, transformer: Option<Transformer>) -> Self {
        SchemaEntry {
            selector: selector.into(),
            transformer,
        }
    }
}

/// A declarative, nestable description of the document to build from a node.
#[derive(Clone, Debug)]
pub enum Schema {
    Fields(Vec<SchemaEntry>),
    WholeNode(Transform),
}

impl Default for Schema {
    fn default() -> Self {
        Schema::Fields(Vec::new())
    }
}

impl Schema {
    /// Creates an empty field-list schema. An empty schema counts as absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field-list schema of bare selectors.
    pub fn fields<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Fields(
            selectors
                .into_iter()
                .map(|selector| SchemaEntry::new(selector, None))
                .collect(),
        )
    }

    /// Creates a whole-node transform schema.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&dyn Node) -> Result<Option<Raw>> + Send + Sync + 'static,
    {
        Schema::WholeNode(Transform::new(f))
    }

    /// Appends an entry. Appending to a whole-node transform replaces it with a field list.
    #[must_use]
    pub fn entry(self, entry: SchemaEntry) -> Self {
        match self {
            Schema::Fields(mut entries) => {
                entries.push(entry);
                Schema::Fields(entries)
            }
            Schema::WholeNode(_) => Schema::Fields(vec![entry]),
        }
    }

    /// Appends a bare selector.
    #[must_use]
    pub fn field(self, selector: impl Into<String>) -> Self {
        self.entry(SchemaEntry::new(selector, None))
    }

    /// Appends a selector whose node or collection value is shaped by `schema`.
    #[must_use]
    pub fn nest(self, selector: impl Into<String>, schema: Schema) -> Self {
        self.entry(SchemaEntry::new(selector, Some(Transformer::Nested(schema))))
    }

    /// Appends a selector whose value is computed by `f` from the node.
    #[must_use]
    pub fn map<F>(self, selector: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Node) -> Result<Option<Raw>> + Send + Sync + 'static,
    {
        self.entry(SchemaEntry::new(
            selector,
            Some(Transformer::Function(Transform::new(f))),
        ))
    }

    /// Number of entries; a whole-node transform counts as one.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Schema::Fields(entries) => entries.len(),
            Schema::WholeNode(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks every entry, nested schemas included, without consulting a host.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSchema`] for the first entry whose selector is empty.
    pub fn validate(&self) -> Result<()> {
        if let Schema::Fields(entries) = self {
            for entry in entries {
                check_selector(&entry.selector)?;
                if let Some(Transformer::Nested(nested)) = &entry.transformer {
                    nested.validate()?;
                }
            }
        }
        Ok(())
    }

    /// Parses a schema declared as JSON.
    ///
    /// Arrays list selectors; an element may also be an object, whose keys
    /// are appended in order. Objects map selectors to `null` (no
    /// transformer) or to a nested array or object schema. `null` parses to
    /// the empty schema.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSchema`] for an empty selector, a non-string
    /// selector, or a transformer that is not `null`, an array or an object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        let mut entries = Vec::new();
        match value {
            Json::Null => {}
            Json::Array(items) => {
                for item in items {
                    match item {
                        Json::String(selector) => {
                            check_selector(selector)?;
                            entries.push(SchemaEntry::new(selector.as_str(), None));
                        }
                        Json::Object(map) => push_object_entries(map, &mut entries)?,
                        other => {
                            return Err(Error::malformed_schema(
                                &other.to_string(),
                                "selector must be a string",
                            ))
                        }
                    }
                }
            }
            Json::Object(map) => push_object_entries(map, &mut entries)?,
            other => {
                return Err(Error::malformed_schema(
                    &other.to_string(),
                    "schema must be an array or an object",
                ))
            }
        }
        Ok(Schema::Fields(entries))
    }

    /// Parses a schema from JSON text.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSchema`] when the text is not JSON or the schema is malformed.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| Error::malformed_schema(text, &e.to_string()))?;
        Self::from_json(&value)
    }
}

fn push_object_entries(
    map: &serde_json::Map<String, serde_json::Value>,
    entries: &mut Vec<SchemaEntry>,
) -> Result<()> {
    use serde_json::Value as Json;

    for (selector, transformer) in map {
        check_selector(selector)?;
        let transformer = match transformer {
            Json::Null => None,
            Json::Array(_) | Json::Object(_) => {
                Some(Transformer::Nested(Schema::from_json(transformer)?))
            }
            _ => {
                return Err(Error::malformed_schema(
                    selector,
                    "transformer must be null or a nested schema",
                ))
            }
        };
        entries.push(SchemaEntry::new(selector.as_str(), transformer));
    }
    Ok(())
}

fn check_selector(selector: &str) -> Result<()> {
    let (lookup, _) = split_alias(selector);
    if lookup.is_empty() {
        return Err(Error::malformed_schema(selector, "empty selector"));
    }
    Ok(())
}

/// A normalized schema entry.
#[derive(Clone, Debug)]
pub enum FieldSpec<'a> {
    /// The whole current node is handed to the transform.
    WholeNode(&'a Transform),
    Field {
        selector: &'a str,
        display_name: Cow<'a, str>,
        transformer: Option<&'a Transformer>,
    },
}

impl<'a> FieldSpec<'a> {
    /// Output key for field entries; empty for a whole-node entry, whose key is configured.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            FieldSpec::WholeNode(_) => "",
            FieldSpec::Field { display_name, .. } => display_name.as_ref(),
        }
    }
}

/// Turns a schema into its ordered `(selector, displayName, transformer)` entries.
///
/// The empty schema normalizes to an empty list; substituting a default
/// schema is the caller's job.
///
/// # Errors
///
/// [`Error::MalformedSchema`] when an entry's selector is empty.
pub fn normalize(schema: &Schema) -> Result<Vec<FieldSpec<'_>>> {
    match schema {
        Schema::WholeNode(transform) => Ok(vec![FieldSpec::WholeNode(transform)]),
        Schema::Fields(entries) => entries
            .iter()
            .map(|entry| {
                let (selector, alias) = split_alias(&entry.selector);
                if selector.is_empty() {
                    return Err(Error::malformed_schema(&entry.selector, "empty selector"));
                }
                let display_name = match alias {
                    Some(alias) if !alias.is_empty() => Cow::Borrowed(alias),
                    _ => lower_camel(selector),
                };
                Ok(FieldSpec::Field {
                    selector,
                    display_name,
                    transformer: entry.transformer.as_ref(),
                })
            })
            .collect(),
    }
}

/// Splits `selector#alias` on the first `#`.
#[must_use]
pub fn split_alias(selector: &str) -> (&str, Option<&str>) {
    match selector.split_once('#') {
        Some((lookup, alias)) => (lookup, Some(alias)),
        None => (selector, None),
    }
}

/// Lowercases the first character.
///
/// # Examples
///
/// ```rust
/// use page_query::schema::lower_camel;
///
/// assert_eq!(lower_camel("HttpUrl"), "httpUrl");
/// assert_eq!(lower_camel("url"), "url");
/// ```
#[must_use]
pub fn lower_camel(selector: &str) -> Cow<'_, str> {
    let mut chars = selector.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(selector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(schema: &Schema) -> Vec<(String, String)> {
        normalize(schema)
            .unwrap()
            .iter()
            .map(|spec| match spec {
                FieldSpec::Field {
                    selector,
                    display_name,
                    ..
                } => (selector.to_string(), display_name.to_string()),
                FieldSpec::WholeNode(_) => (String::new(), String::new()),
            })
            .collect()
    }

    #[test]
    fn test_alias_and_lower_camel() {
        let schema = Schema::fields(["title#heading", "HttpUrl", "body#"]);
        assert_eq!(
            names(&schema),
            vec![
                ("title".to_string(), "heading".to_string()),
                ("HttpUrl".to_string(), "httpUrl".to_string()),
                ("body".to_string(), "body".to_string()),
            ]
        );
    }

    #[test]
    fn test_alias_splits_on_first_hash() {
        assert_eq!(split_alias("a#b#c"), ("a", Some("b#c")));
        assert_eq!(split_alias("plain"), ("plain", None));
    }

    #[test]
    fn test_order_and_duplicates_are_kept() {
        let schema = Schema::fields(["c", "a", "b#a"]);
        let keys: Vec<_> = names(&schema).into_iter().map(|(_, name)| name).collect();
        assert_eq!(keys, vec!["c", "a", "a"]);
    }

    #[test]
    fn test_empty_schema_normalizes_to_nothing() {
        assert!(normalize(&Schema::new()).unwrap().is_empty());
        assert!(Schema::new().is_empty());
    }

    #[test]
    fn test_whole_node_transform() {
        let schema = Schema::transform(|node| Ok(Some(Raw::from(node.type_name()))));
        let specs = normalize(&schema).unwrap();
        assert_eq!(specs.len(), 1);
        assert!(matches!(specs[0], FieldSpec::WholeNode(_)));
    }

    #[test]
    fn test_empty_selector_is_malformed() {
        let err = normalize(&Schema::fields(["ok", "#alias"])).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { ref entry, .. } if entry == "#alias"));
        assert!(normalize(&Schema::fields([""])).is_err());
    }

    #[test]
    fn test_validate_reaches_nested_schemas() {
        let schema = Schema::new()
            .field("title")
            .nest("images", Schema::new().nest("thumbs", Schema::fields(["#bad"])));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { ref entry, .. } if entry == "#bad"));

        let schema = Schema::new()
            .nest("images", Schema::fields(["url#src"]))
            .map("count", |_| Ok(None));
        assert!(schema.validate().is_ok());
        assert!(Schema::transform(|_| Ok(None)).validate().is_ok());
    }

    #[test]
    fn test_appending_replaces_whole_node_transform() {
        let schema = Schema::transform(|_| Ok(None)).field("title");
        assert_eq!(names(&schema), vec![("title".to_string(), "title".to_string())]);
    }

    #[test]
    fn test_from_json_mixed_array() {
        let schema = Schema::from_json(&json!([
            "title",
            { "children": ["title"], "Body#text": null }
        ]))
        .unwrap();
        assert_eq!(
            names(&schema),
            vec![
                ("title".to_string(), "title".to_string()),
                ("children".to_string(), "children".to_string()),
                ("Body".to_string(), "text".to_string()),
            ]
        );
        match &schema {
            Schema::Fields(entries) => {
                assert!(matches!(entries[1].transformer, Some(Transformer::Nested(_))));
                assert!(entries[2].transformer.is_none());
            }
            Schema::WholeNode(_) => panic!("Expected field list"),
        }
    }

    #[test]
    fn test_from_json_rejects_bad_transformer() {
        let err = Schema::from_json(&json!({ "title": "upper" })).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { ref entry, .. } if entry == "title"));
        assert!(Schema::from_json(&json!([1])).is_err());
        assert!(Schema::from_json(&json!("title")).is_err());
        assert!(Schema::from_json(&json!({ "#x": null })).is_err());
    }

    #[test]
    fn test_from_json_null_is_empty() {
        assert!(Schema::from_json(&serde_json::Value::Null).unwrap().is_empty());
        assert!(Schema::from_json_str("not json").is_err());
    }
}
