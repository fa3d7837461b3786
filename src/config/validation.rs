use super::*;

impl KeyValues {
    /// Get a value and check it with `validator`; `valid_values` describes
    /// what was expected for the error message.
    pub fn get_validated<T, F>(&self, path: &str, validator: F, valid_values: &str) -> Result<T, KvError>
    where
        T: TryFrom<Value, Error = KvError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(path)?;

        if !validator(&typed_value) {
            return Err(KvError::ValidationError {
                message: format!("Invalid value for `{}`", path),
                hint: Some(format!("Expected: {}", valid_values)),
                code: Some(450),
            });
        }

        Ok(typed_value)
    }

    /// Get a string and check it is one of `allowed_values`, ignoring case.
    /// The value is returned as written in the document.
    pub fn get_string_enum(&self, path: &str, allowed_values: &[&str]) -> Result<String, KvError> {
        let value: String = self.get(path)?;

        if !allowed_values.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
            return Err(KvError::ValidationError {
                message: format!("Invalid value '{}' for `{}`", value, path),
                hint: Some(format!("Expected one of: {}", allowed_values.join(", "))),
                code: Some(451),
            });
        }

        Ok(value)
    }
}
