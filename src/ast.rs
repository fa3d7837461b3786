use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Ordered key/value pairs of a single `{ ... }` block.
pub type Object = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Object(Object),
    /// Every value seen for a key that appeared more than once in the same
    /// object, in encounter order. Only produced when duplicates are not merged.
    List(Vec<Value>),
}

/// The result of parsing one KeyValues file: root names mapped to their values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub roots: Object,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        if let Value::Object(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(values) = self {
            Some(values)
        } else {
            None
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Looks up a direct child of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|items| items.get(key))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::List(_) => "list of duplicates",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(items: Object) -> Self {
        Value::Object(items)
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.roots.get(name)
    }

    /// The first root entry by insertion order, which is what `#base` merges into.
    pub fn first_root(&self) -> Option<(&String, &Value)> {
        self.roots.first()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.roots.iter()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for (key, value) in items {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.roots.serialize(serializer)
    }
}
