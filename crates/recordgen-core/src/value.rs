use serde::Serialize;
use time::PrimitiveDateTime;

///
/// Value
///
/// One entry of a property bag, typed the way a record hands it over for a write.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

///
/// Stored
///
/// A column value as the backend keeps it: four storage classes plus null.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Stored {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Stored {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }
}

impl From<Value> for Stored {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Integer(i64::from(b)),
            Value::Int(v) => Self::Integer(i64::from(v)),
            Value::Long(v) => Self::Integer(v),
            Value::Float(v) => Self::Real(f64::from(v)),
            Value::Double(v) => Self::Real(v),
            Value::Text(s) => Self::Text(s),
            Value::Blob(b) => Self::Blob(b),
        }
    }
}

///
/// FieldValue
///
/// The value a generated record field holds in memory.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
    DateTime(PrimitiveDateTime),

    /// Index of an enum literal in declaration order.
    Ordinal(usize),
}

impl FieldValue {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::DateTime(_) => "date",
            Self::Ordinal(_) => "ordinal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_are_stored_as_integers() {
        assert_eq!(Stored::from(Value::Bool(true)), Stored::Integer(1));
        assert_eq!(Stored::from(Value::Bool(false)), Stored::Integer(0));
    }

    #[test]
    fn floats_widen_without_loss() {
        let Stored::Real(real) = Stored::from(Value::Float(123.56)) else {
            panic!("float should be stored as real");
        };

        #[allow(clippy::cast_possible_truncation)]
        let narrowed = real as f32;
        assert_eq!(narrowed.to_bits(), 123.56_f32.to_bits());
    }
}
