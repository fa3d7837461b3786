use super::*;

impl KeyValues {
    /// Get a typed value using dot notation.
    ///
    /// Each segment is matched against keys exactly first, then ignoring
    /// ASCII case. A numeric segment selects one value of a duplicated key.
    ///
    /// # Examples
    /// ```
    /// # use valve_kv::KeyValues;
    /// # fn main() -> Result<(), valve_kv::KvError> {
    /// let kv = KeyValues::from_str(r#""unit" { "MovementSpeed" "300" "IsHero" "1" }"#)?;
    /// let speed: u32 = kv.get("unit.MovementSpeed")?;
    /// let hero: bool = kv.get("unit.ishero")?;
    /// assert_eq!(speed, 300);
    /// assert!(hero);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// `PathNotFound` if the path doesn't exist, `TypeError` if the value
    /// can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, KvError>
    where
        T: TryFrom<Value, Error = KvError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value.clone()).map_err(|e| with_path(e, path))
    }

    /// Like [`KeyValues::get`], but a missing path is `Ok(None)`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, KvError>
    where
        T: TryFrom<Value, Error = KvError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(KvError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = KvError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get the raw `Value` at a dotted path.
    pub fn get_value(&self, path: &str) -> Result<&Value, KvError> {
        let segments = helpers::split_path(path);
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| helpers::path_not_found(path, &[], path))?;

        let mut current = helpers::lookup_key(&self.document.roots, first)
            .ok_or_else(|| helpers::path_not_found(path, &[], first))?;

        for (i, segment) in rest.iter().enumerate() {
            current = helpers::step(current, segment)
                .ok_or_else(|| helpers::path_not_found(path, &segments[..=i], segment))?;
        }

        Ok(current)
    }

    /// Keys of the object at `path`, in document order. An empty path lists
    /// the root names.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, KvError> {
        if path.is_empty() {
            return Ok(self.document.roots.keys().cloned().collect());
        }

        match self.get_value(path)? {
            Value::Object(items) => Ok(items.keys().cloned().collect()),
            other => Err(KvError::TypeError {
                message: format!("Path '{}' is a {}, not an object", path, other.type_name()),
                hint: Some("Only objects have keys".into()),
                code: Some(408),
            }),
        }
    }

    /// Check if a path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}

fn with_path(e: KvError, path: &str) -> KvError {
    match e {
        KvError::TypeError { message, hint, code } => KvError::TypeError {
            message: format!("{} (at '{}')", message, path),
            hint,
            code,
        },
        other => other,
    }
}
