use thiserror::Error as ThisError;

///
/// CoreError
///

#[derive(Debug, ThisError)]
pub enum CoreError {
    #[error("column '{0}' not found")]
    UnknownColumn(String),

    #[error("key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("ordinal {ordinal} is out of range for an enum with {len} literals")]
    OrdinalOutOfRange { ordinal: i64, len: usize },

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("persistence context failed: {0}")]
    Persistence(String),
}

impl CoreError {
    pub(crate) fn mismatch(key: &str, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }
}
