use crate::{CoreError, value::Value};
use serde::Serialize;

///
/// PropertyBag
///
/// Ordered key/value staging area for one record write.
/// Putting an existing key replaces its value in place.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PropertyBag {
    entries: Vec<(String, Value)>,
}

impl PropertyBag {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ------------------------------------------------------------------
    // typed readers
    // absent keys and nulls both read as None
    // ------------------------------------------------------------------

    pub fn get_as_int(&self, key: &str) -> Result<Option<i32>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Int(v)) => Ok(Some(*v)),
            Some(Value::Long(v)) => i32::try_from(*v)
                .map(Some)
                .map_err(|_| CoreError::mismatch(key, "int", "long")),
            Some(Value::Bool(b)) => Ok(Some(i32::from(*b))),
            Some(other) => Err(CoreError::mismatch(key, "int", other.kind())),
        }
    }

    pub fn get_as_long(&self, key: &str) -> Result<Option<i64>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Int(v)) => Ok(Some(i64::from(*v))),
            Some(Value::Long(v)) => Ok(Some(*v)),
            Some(Value::Bool(b)) => Ok(Some(i64::from(*b))),
            Some(other) => Err(CoreError::mismatch(key, "long", other.kind())),
        }
    }

    pub fn get_as_text(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(CoreError::mismatch(key, "text", other.kind())),
        }
    }

    pub fn get_as_bool(&self, key: &str) -> Result<Option<bool>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Int(v)) => Ok(Some(*v != 0)),
            Some(Value::Long(v)) => Ok(Some(*v != 0)),
            Some(other) => Err(CoreError::mismatch(key, "bool", other.kind())),
        }
    }

    pub fn get_as_float(&self, key: &str) -> Result<Option<f32>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Float(v)) => Ok(Some(*v)),
            #[allow(clippy::cast_possible_truncation)]
            Some(Value::Double(v)) => Ok(Some(*v as f32)),
            Some(other) => Err(CoreError::mismatch(key, "float", other.kind())),
        }
    }

    pub fn get_as_double(&self, key: &str) -> Result<Option<f64>, CoreError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Double(v)) => Ok(Some(*v)),
            Some(Value::Float(v)) => Ok(Some(f64::from(*v))),
            Some(Value::Int(v)) => Ok(Some(f64::from(*v))),
            Some(other) => Err(CoreError::mismatch(key, "double", other.kind())),
        }
    }
}
