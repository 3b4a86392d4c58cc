//! Process-wide lookup tables: default schemas and collection index policy.
//!
//! A [`Policy`] is read-only for the lifetime of an [`Engine`](crate::Engine)
//! and may be shared between engines running on different threads.
//!
//! - `numeric_index_types`: type or template names whose collection elements
//!   are always keyed by position
//! - `id_preferred_types`: names whose elements prefer the id label over the
//!   name label
//! - `default_schemas`: selector lists used when the caller passes no schema
//!
//! Tables can be loaded from JSON. Keys left out keep their built-in values:
//!
//! ```rust
//! use page_query::Policy;
//!
//! let policy = Policy::from_json_str(r#"{ "id_preferred_types": ["Page"] }"#).unwrap();
//! assert!(policy.prefers_id("Page"));
//! assert!(policy.is_numeric("Pagefile"));
//! ```

use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

const FILE_FIELDS: [&str; 8] = [
    "basename",
    "url",
    "httpUrl",
    "description",
    "ext",
    "filesize",
    "filesizeStr",
    "hash",
];

const IMAGE_FIELDS: [&str; 6] = ["basename", "url", "httpUrl", "description", "ext", "focus"];

/// Default schemas and index policy tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub numeric_index_types: IndexSet<String>,
    pub id_preferred_types: IndexSet<String>,
    pub default_schemas: IndexMap<String, Vec<String>>,
    /// Field read for an id-like collection label.
    pub id_field: String,
    /// Field read for a name-like collection label.
    pub name_field: String,
}

impl Default for Policy {
    /// The built-in tables: file and image types index numerically, and
    /// files, images, map markers and users carry default schemas.
    fn default() -> Self {
        Policy::empty()
            .with_numeric_index_type("Pageimage")
            .with_numeric_index_type("Pagefile")
            .with_numeric_index_type("RepeaterMatrixPage")
            .with_default_schema("Pageimage", IMAGE_FIELDS)
            .with_default_schema("Pageimages", IMAGE_FIELDS)
            .with_default_schema("Pagefile", FILE_FIELDS)
            .with_default_schema("Pagefiles", FILE_FIELDS)
            .with_default_schema("MapMarker", ["lat", "lng", "zoom", "address"])
            .with_default_schema("User", ["name", "email"])
    }
}

impl Policy {
    /// Creates a policy with empty tables and the `id`/`name` label fields.
    #[must_use]
    pub fn empty() -> Self {
        Policy {
            numeric_index_types: IndexSet::new(),
            id_preferred_types: IndexSet::new(),
            default_schemas: IndexMap::new(),
            id_field: "id".to_string(),
            name_field: "name".to_string(),
        }
    }

    /// Loads a policy from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the text is not valid JSON or has the wrong shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(Error::config)
    }

    #[must_use]
    pub fn with_numeric_index_type(mut self, name: impl Into<String>) -> Self {
        self.numeric_index_types.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_id_preferred_type(mut self, name: impl Into<String>) -> Self {
        self.id_preferred_types.insert(name.into());
        self
    }

    /// Registers (or replaces) the default selector list for `type_name`.
    #[must_use]
    pub fn with_default_schema<I, S>(mut self, type_name: impl Into<String>, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_schemas
            .insert(type_name.into(), selectors.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_label_fields(mut self, id_field: impl Into<String>, name_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self.name_field = name_field.into();
        self
    }

    #[must_use]
    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_index_types.contains(name)
    }

    #[must_use]
    pub fn prefers_id(&self, name: &str) -> bool {
        self.id_preferred_types.contains(name)
    }

    /// Exact-match lookup of the default selector list for `type_name`.
    #[must_use]
    pub fn default_schema(&self, type_name: &str) -> Option<&[String]> {
        self.default_schemas.get(type_name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let policy = Policy::default();
        assert!(policy.is_numeric("Pageimage"));
        assert!(policy.is_numeric("RepeaterMatrixPage"));
        assert!(!policy.is_numeric("Page"));
        assert!(policy.id_preferred_types.is_empty());
        assert_eq!(
            policy.default_schema("User"),
            Some(&["name".to_string(), "email".to_string()][..])
        );
        assert_eq!(policy.default_schema("Pagefile").map(<[String]>::len), Some(8));
    }

    #[test]
    fn test_lookup_is_exact() {
        let policy = Policy::default();
        assert!(policy.default_schema("user").is_none());
        assert!(policy.default_schema("Page").is_none());
    }

    #[test]
    fn test_from_json_keeps_unlisted_defaults() {
        let policy = Policy::from_json_str(
            r#"{ "numeric_index_types": ["Gallery"], "default_schemas": { "Page": ["title"] } }"#,
        )
        .unwrap();
        assert!(policy.is_numeric("Gallery"));
        assert!(!policy.is_numeric("Pagefile"));
        assert_eq!(policy.default_schema("Page"), Some(&["title".to_string()][..]));
        assert_eq!(policy.id_field, "id");
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let err = Policy::from_json_str(r#"{ "numeric_index_types": 3 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
