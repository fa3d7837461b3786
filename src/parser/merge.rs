use tracing::trace;

use super::*;

/// Store `value` under `key`, applying the duplicate-key policy.
pub(super) fn store(items: &mut Object, key: String, value: Value, merge: bool) {
    match items.get_mut(&key) {
        None => {
            items.insert(key, value);
        }
        Some(existing) if merge => {
            trace!(key = %key, "merging duplicate key");
            merge_values(existing, value);
        }
        Some(Value::List(values)) => values.push(value),
        Some(existing) => {
            trace!(key = %key, "collecting duplicate key");
            let first = std::mem::replace(existing, Value::List(Vec::new()));
            *existing = Value::List(vec![first, value]);
        }
    }
}

/// Merge `incoming` into `existing`: objects merge key by key, anything else
/// replaces the old value.
fn merge_values(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, other) => *slot = other,
    }
}
