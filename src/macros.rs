/// Builds a [`Value`](crate::Value) from a JSON-like literal, keeping key order.
///
/// ```rust
/// use page_query::{doc, Value};
///
/// let page = doc!({ "title": "Home", "tags": ["a", "b"], "parent": null });
/// assert_eq!(page.get("parent"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! doc {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::doc!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::DocumentMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::DocumentMap::new();
        $(
            object.insert($key.to_string(), $crate::doc!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Anything else converts through `From`
    ($s:expr) => {
        $crate::Value::from($s)
    };
}
