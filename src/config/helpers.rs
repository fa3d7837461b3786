use crate::ast::{Object, Value};
use crate::KvError;

/// Find `key` among an object's entries: exact match first, then ASCII
/// case-insensitive (first match in insertion order).
pub(super) fn lookup_key<'a>(items: &'a Object, key: &str) -> Option<&'a Value> {
    items.get(key).or_else(|| {
        items
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Take one step along a dotted path. Objects are searched by key, lists of
/// duplicate values are indexed by a numeric segment.
pub(super) fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(items) => lookup_key(items, segment),
        Value::List(values) => segment.parse::<usize>().ok().and_then(|i| values.get(i)),
        Value::String(_) => None,
    }
}

pub(super) fn split_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

pub(super) fn path_not_found(path: &str, walked: &[&str], missing: &str) -> KvError {
    let hint = if walked.is_empty() {
        format!("The document has no root named '{}'", missing)
    } else {
        format!("'{}' has no child named '{}'", walked.join("."), missing)
    };

    KvError::PathNotFound {
        path: path.to_string(),
        hint: Some(hint),
        code: Some(401),
    }
}
