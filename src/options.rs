//! Configuration options for document building.
//!
//! [`QueryOptions`] carries everything the engine used to read from ambient
//! configuration: the date format applied to timestamp-like integers, the
//! time-zone offset those dates are rendered in, the debug flag gating trace
//! output, and how the final document is encoded.
//!
//! ## Examples
//!
//! ```rust
//! use page_query::QueryOptions;
//!
//! let options = QueryOptions::new()
//!     .with_date_format("d.m.Y")
//!     .with_utc_offset(3600)
//!     .with_debug(true);
//! assert_eq!(options.date_format, "d.m.Y");
//! ```

use chrono::{FixedOffset, Offset, Utc};

/// Default `date()`-style format for timestamp coercion.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d H:i:s";

/// Default output key for a whole-node transform.
pub const DEFAULT_WHOLE_NODE_KEY: &str = "value";

/// Configuration options for document building.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOptions {
    /// `date()`-style format string, see [`crate::datefmt`].
    pub date_format: String,
    /// Offset east of UTC, in seconds, used when rendering dates.
    pub utc_offset_seconds: i32,
    /// Emits `tracing` debug events when set. Never changes output.
    pub debug: bool,
    /// Renders integers greater than one as dates when they parse as timestamps.
    pub detect_timestamps: bool,
    /// Output key under which a whole-node transform stores its result.
    pub whole_node_key: String,
    /// Pretty-prints encoded documents.
    pub pretty: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            utc_offset_seconds: 0,
            debug: false,
            detect_timestamps: true,
            whole_node_key: DEFAULT_WHOLE_NODE_KEY.to_string(),
            pretty: false,
        }
    }
}

impl QueryOptions {
    /// Creates default options (`Y-m-d H:i:s` dates in UTC, debug off, compact encoding).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use page_query::QueryOptions;
    ///
    /// let options = QueryOptions::new();
    /// assert!(options.detect_timestamps);
    /// assert!(!options.debug);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed encoding.
    #[must_use]
    pub fn pretty() -> Self {
        QueryOptions {
            pretty: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the offset east of UTC, in seconds. Out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Turns timestamp detection on or off. When off, integers always pass through.
    #[must_use]
    pub fn with_timestamp_detection(mut self, detect: bool) -> Self {
        self.detect_timestamps = detect;
        self
    }

    #[must_use]
    pub fn with_whole_node_key(mut self, key: impl Into<String>) -> Self {
        self.whole_node_key = key.into();
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The configured offset, or UTC when the configured seconds are out of range.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        let options = QueryOptions::new().with_utc_offset(86_400 * 2);
        assert_eq!(options.offset().local_minus_utc(), 0);

        let options = QueryOptions::new().with_utc_offset(-3600);
        assert_eq!(options.offset().local_minus_utc(), -3600);
    }
}
