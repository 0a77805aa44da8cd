use serde::Serialize;

/// Serialize a program, tree, or coil list to a pretty-printed JSON string.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("program and tree serialization cannot fail")
}
