// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::{KvError, Value};

impl TryFrom<Value> for String {
    type Error = KvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(KvError::TypeError {
                message: format!("Expected string, got {}", other.type_name()),
                hint: Some("Only plain key/value entries hold strings".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = KvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let s = String::try_from(value)?;
        match s.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            t if t.eq_ignore_ascii_case("true") => Ok(true),
            t if t.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(KvError::TypeError {
                message: format!("Invalid boolean value '{}'", s),
                hint: Some("Use 1/0 or true/false".into()),
                code: Some(403),
            }),
        }
    }
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = KvError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let s = String::try_from(value)?;
                    s.trim().parse::<$ty>().map_err(|e| KvError::TypeError {
                        message: format!("Cannot read '{}' as {}: {}", s, stringify!($ty), e),
                        hint: Some(format!("Use a value that fits in {}", stringify!($ty))),
                        code: Some(404),
                    })
                }
            }
        )*
    };
}

impl_numeric!(f32, f64, i32, i64, u8, u16, u32, u64, usize);

/// A key that appeared several times converts element-wise; a single value
/// becomes a one-element vector.
impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = KvError>,
{
    type Error = KvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(values) => values.into_iter().map(T::try_from).collect(),
            single => Ok(vec![T::try_from(single)?]),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, Value> {
    type Error = KvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Ok(items),
            other => Err(KvError::TypeError {
                message: format!("Expected object, got {}", other.type_name()),
                hint: Some("Use a { ... } block".into()),
                code: Some(407),
            }),
        }
    }
}
