//! Classification of resolved values.
//!
//! A resolved [`Raw`] value ends up as one of three things:
//!
//! 1. a date string, when it is an integer greater than one that parses as
//!    a Unix timestamp (and timestamp detection is on),
//! 2. plain data, passed through unchanged,
//! 3. a node, collection or keyed map, which the engine traverses in turn.
//!
//! Failing to parse as a timestamp is not an error. The integer just stays
//! an integer.

use crate::datefmt::format_timestamp;
use crate::host::{Raw, Target};
use crate::{QueryOptions, Value};

/// Outcome of classifying one resolved value.
pub enum Coerced<'r> {
    Date(String),
    Scalar(Value),
    Nested(Target<'r>),
}

/// Classifies `raw` under `options`.
#[must_use]
pub fn classify<'r>(raw: &'r Raw, options: &QueryOptions) -> Coerced<'r> {
    match raw {
        Raw::Integer(secs) => match timestamp_string(*secs, options) {
            Some(date) => Coerced::Date(date),
            None => Coerced::Scalar(Value::from(*secs)),
        },
        Raw::Bool(b) => Coerced::Scalar(Value::Bool(*b)),
        Raw::Float(f) => Coerced::Scalar(Value::from(*f)),
        Raw::String(s) => Coerced::Scalar(Value::from(s.as_str())),
        Raw::Array(items) => Coerced::Scalar(Value::Array(items.clone())),
        Raw::Node(node) => Coerced::Nested(Target::Node(node.as_ref())),
        Raw::Collection(collection) => Coerced::Nested(Target::Collection(collection.as_ref())),
        Raw::Keyed(map) => Coerced::Nested(Target::Keyed(map)),
    }
}

/// Renders `secs` as a date when it qualifies as a timestamp.
///
/// # Examples
///
/// ```rust
/// use page_query::coerce::timestamp_string;
/// use page_query::QueryOptions;
///
/// let options = QueryOptions::new().with_date_format("Y-m-d");
/// assert_eq!(timestamp_string(1_700_000_000, &options).as_deref(), Some("2023-11-14"));
/// assert_eq!(timestamp_string(1, &options), None);
/// assert_eq!(timestamp_string(0, &options), None);
/// ```
#[must_use]
pub fn timestamp_string(secs: i64, options: &QueryOptions) -> Option<String> {
    if !options.detect_timestamps || secs <= 1 {
        return None;
    }
    format_timestamp(secs, &options.date_format, options.offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::KeyedValueMap;

    fn options() -> QueryOptions {
        QueryOptions::new().with_date_format("Y-m-d")
    }

    #[test]
    fn test_integer_becomes_date() {
        match classify(&Raw::from(1_700_000_000i64), &options()) {
            Coerced::Date(date) => assert_eq!(date, "2023-11-14"),
            _ => panic!("Expected date"),
        }
    }

    #[test]
    fn test_small_and_huge_integers_pass_through() {
        for secs in [0i64, 1, -5, i64::MAX] {
            match classify(&Raw::from(secs), &options()) {
                Coerced::Scalar(value) => assert_eq!(value, Value::from(secs)),
                _ => panic!("Expected {} to pass through", secs),
            }
        }
    }

    #[test]
    fn test_detection_can_be_disabled() {
        let options = options().with_timestamp_detection(false);
        assert!(matches!(
            classify(&Raw::from(1_700_000_000i64), &options),
            Coerced::Scalar(_)
        ));
    }

    #[test]
    fn test_strings_and_arrays_pass_through() {
        let raw = Raw::from("2023-11-14");
        assert!(matches!(classify(&raw, &options()), Coerced::Scalar(Value::String(_))));

        let raw = Raw::from(vec![Value::from(1), Value::from("a")]);
        match classify(&raw, &options()) {
            Coerced::Scalar(value) => {
                assert_eq!(value, Value::Array(vec![Value::from(1), Value::from("a")]))
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_keyed_map_is_nested() {
        let raw = Raw::from(KeyedValueMap::new().with("default", "Hi"));
        assert!(matches!(
            classify(&raw, &options()),
            Coerced::Nested(Target::Keyed(_))
        ));
    }
}
