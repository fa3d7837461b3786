use serde::{Deserialize, Serialize};

/// Options controlling how a KeyValues document is built.
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// What to do when a key appears more than once in the same object.
    ///
    /// When `false`, every value is kept and the key maps to a
    /// [`Value::List`](crate::Value::List) in encounter order.
    ///
    /// When `true`, object values are merged key by key (recursively) and any
    /// other value replaces the earlier one.
    pub merge_duplicates: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_duplicates(mut self, merge: bool) -> Self {
        self.merge_duplicates = merge;
        self
    }
}
