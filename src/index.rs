//! Output keys for collection elements.
//!
//! Each element of a collection is stored either under its running position
//! or under a label read from one of its own fields. Types and templates
//! listed in [`Policy::numeric_index_types`] always use the position. Every
//! other element uses the first non-blank label in its precedence list:
//!
//! - `name`, then `id` by default
//! - `id`, then `name` when its type prefers ids
//! - `id`, then `name`, then `id` again when its template prefers ids
//!
//! and falls back to the position when no label is found.

use crate::host::Node;
use crate::{Policy, Result};
use std::fmt;

/// The key chosen for one collection element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexKey {
    Position(usize),
    Label(String),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Position(n) => write!(f, "{}", n),
            IndexKey::Label(label) => f.write_str(label),
        }
    }
}

/// How an element's key is chosen, before any field is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRule<'p> {
    pub numeric: bool,
    /// Label fields, tried in order.
    pub labels: Vec<&'p str>,
}

/// Works out the index rule for `node` from its type and template names.
#[must_use]
pub fn index_rule<'p>(node: &dyn Node, policy: &'p Policy) -> IndexRule<'p> {
    let id = policy.id_field.as_str();
    let name = policy.name_field.as_str();
    let type_name = node.type_name();

    let mut numeric = policy.is_numeric(type_name);
    let mut labels = if policy.prefers_id(type_name) {
        vec![id, name]
    } else {
        vec![name, id]
    };

    if let Some(template) = node.template_name() {
        numeric = numeric || policy.is_numeric(template);
        if policy.prefers_id(template) {
            // escalate to id, name, id while keeping the type-level labels
            if labels.first() == Some(&id) {
                labels.push(id);
            } else {
                labels.insert(0, id);
            }
        }
    }

    IndexRule { numeric, labels }
}

/// Chooses the key for the element at `position`.
///
/// # Errors
///
/// Host errors from reading label fields.
pub fn index_for(node: &dyn Node, position: usize, policy: &Policy) -> Result<IndexKey> {
    let rule = index_rule(node, policy);
    if rule.numeric {
        return Ok(IndexKey::Position(position));
    }
    for label in &rule.labels {
        if let Some(candidate) = label_value(node, label)? {
            return Ok(IndexKey::Label(candidate));
        }
    }
    Ok(IndexKey::Position(position))
}

fn label_value(node: &dyn Node, field: &str) -> Result<Option<String>> {
    let value = match node.field(field)?.and_then(|raw| raw.to_scalar()) {
        Some(value) if !value.is_blank() => value,
        _ => return Ok(None),
    };
    Ok(match value {
        crate::Value::String(s) => Some(s),
        crate::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
