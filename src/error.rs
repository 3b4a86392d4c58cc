//! Error types for schema construction, traversal and encoding.
//!
//! Absence is never an error here. A node with no schema degrades to an empty
//! document, a selector that resolves to nothing degrades to `null`, and an
//! integer that does not parse as a timestamp simply stays an integer. The
//! variants below cover the failures that the caller has to see:
//!
//! - **Malformed schemas**: an entry whose shape cannot drive a traversal
//! - **Host failures**: a node or collection rejected a lookup
//! - **Encoding failures**: the document could not be rendered as text
//! - **Configuration failures**: policy tables could not be loaded
//!
//! ## Examples
//!
//! ```rust
//! use page_query::{Error, Schema};
//! use serde_json::json;
//!
//! let result = Schema::from_json(&json!({ "title": 42 }));
//! assert!(matches!(result, Err(Error::MalformedSchema { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all failures surfaced by query building.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A schema entry has an empty selector or an unusable transformer
    #[error("Malformed schema entry {entry:?}: {reason}")]
    MalformedSchema { entry: String, reason: String },

    /// A host capability failed while being invoked
    #[error("Host error: {0}")]
    Host(String),

    /// The document could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Policy or option loading failed
    #[error("Config error: {0}")]
    Config(String),

    /// A failure raised by a schema function
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed-schema error for the entry named `entry`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use page_query::Error;
    ///
    /// let err = Error::malformed_schema("#alias", "empty selector");
    /// assert!(err.to_string().contains("empty selector"));
    /// ```
    pub fn malformed_schema(entry: &str, reason: &str) -> Self {
        Error::MalformedSchema {
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a host error. Host implementations return this from lookups they reject.
    pub fn host<T: fmt::Display>(msg: T) -> Self {
        Error::Host(msg.to_string())
    }

    pub fn encode<T: fmt::Display>(msg: T) -> Self {
        Error::Encode(msg.to_string())
    }

    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a custom error. Schema functions return this for their own failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use page_query::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::encode(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
