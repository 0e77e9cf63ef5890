use crate::{
    CoreError,
    bag::PropertyBag,
    cursor::RowCursor,
    value::{FieldValue, Value},
};
use serde::Serialize;
use time::{OffsetDateTime, PrimitiveDateTime, macros::format_description};

const NANOS_PER_MILLI: i128 = 1_000_000;

///
/// DatePrecision
///
/// Resolution of a string-encoded calendar date.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DatePrecision {
    /// `2024-03-01 12:30:05`
    Seconds,

    /// `2024-03-01T12:30:05.250`
    Millis,
}

impl DatePrecision {
    pub fn format(self, value: PrimitiveDateTime) -> Result<String, CoreError> {
        let formatted = match self {
            Self::Seconds => {
                value.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            }
            Self::Millis => value.format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
            )),
        };

        formatted.map_err(|e| CoreError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn parse(self, text: &str) -> Result<PrimitiveDateTime, CoreError> {
        let parsed = match self {
            Self::Seconds => PrimitiveDateTime::parse(
                text,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            ),
            Self::Millis => PrimitiveDateTime::parse(
                text,
                format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
                ),
            ),
        };

        parsed.map_err(|e| CoreError::InvalidDate {
            value: text.to_string(),
            reason: e.to_string(),
        })
    }
}

///
/// Codec
///
/// How one column travels between a record field, a property bag and a row cursor.
/// A codec writes a `FieldValue` into a bag entry and reads it back from either
/// the bag or a cursor over the stored row.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Codec {
    Int,
    Long,
    Text,
    Bool,
    Float,
    Double,

    /// Calendar date stored as text.
    CalendarText(DatePrecision),

    /// Instant stored as milliseconds since the Unix epoch (UTC).
    EpochMillis,

    /// Enum stored as the index of its literal.
    Ordinal { len: usize },
}

impl Codec {
    /// Stage `value` for a property bag write.
    pub fn encode(self, value: &FieldValue) -> Result<Value, CoreError> {
        let encoded = match (self, value) {
            (_, FieldValue::Null) => Value::Null,
            (Self::Int, FieldValue::Int(v)) => Value::Int(*v),
            (Self::Long, FieldValue::Long(v)) => Value::Long(*v),
            (Self::Text, FieldValue::Text(s)) => Value::Text(s.clone()),
            (Self::Bool, FieldValue::Bool(b)) => Value::Bool(*b),
            (Self::Float, FieldValue::Float(v)) => Value::Float(*v),
            (Self::Double, FieldValue::Double(v)) => Value::Double(*v),
            (Self::CalendarText(precision), FieldValue::DateTime(dt)) => {
                Value::Text(precision.format(*dt)?)
            }
            (Self::EpochMillis, FieldValue::DateTime(dt)) => Value::Long(to_epoch_millis(*dt)?),
            (Self::Ordinal { len }, FieldValue::Ordinal(ordinal)) => {
                let index = i32::try_from(*ordinal)
                    .ok()
                    .filter(|_| *ordinal < len)
                    .ok_or_else(|| CoreError::OrdinalOutOfRange {
                        ordinal: i64::try_from(*ordinal).unwrap_or(i64::MAX),
                        len,
                    })?;
                Value::Int(index)
            }
            (codec, other) => {
                return Err(CoreError::mismatch(
                    "<field>",
                    codec.field_kind(),
                    other.kind(),
                ));
            }
        };

        Ok(encoded)
    }

    /// Read a value back from a property bag.
    pub fn decode_bag(self, bag: &PropertyBag, key: &str) -> Result<FieldValue, CoreError> {
        let value = match self {
            Self::Int => bag.get_as_int(key)?.map(FieldValue::Int),
            Self::Long => bag.get_as_long(key)?.map(FieldValue::Long),
            Self::Text => bag.get_as_text(key)?.map(FieldValue::Text),
            Self::Bool => bag.get_as_bool(key)?.map(FieldValue::Bool),
            Self::Float => bag.get_as_float(key)?.map(FieldValue::Float),
            Self::Double => bag.get_as_double(key)?.map(FieldValue::Double),
            Self::CalendarText(precision) => bag
                .get_as_text(key)?
                .map(|text| precision.parse(&text).map(FieldValue::DateTime))
                .transpose()?,
            Self::EpochMillis => bag
                .get_as_long(key)?
                .map(|ms| from_epoch_millis(ms).map(FieldValue::DateTime))
                .transpose()?,
            Self::Ordinal { len } => bag
                .get_as_int(key)?
                .map(|ordinal| check_ordinal(i64::from(ordinal), len).map(FieldValue::Ordinal))
                .transpose()?,
        };

        Ok(value.unwrap_or(FieldValue::Null))
    }

    /// Read a value from the cursor's current row.
    pub fn decode_cursor(
        self,
        cursor: &dyn RowCursor,
        column: &str,
    ) -> Result<FieldValue, CoreError> {
        let index = cursor.column(column)?;

        let value = match self {
            Self::Int => FieldValue::Int(cursor.get_int(index)?),
            Self::Long => FieldValue::Long(cursor.get_long(index)?),
            Self::Text => cursor
                .get_string(index)?
                .map_or(FieldValue::Null, FieldValue::Text),
            Self::Bool => FieldValue::Bool(cursor.get_int(index)? != 0),
            Self::Float => FieldValue::Float(cursor.get_float(index)?),
            Self::Double => FieldValue::Double(cursor.get_double(index)?),
            Self::CalendarText(precision) => match cursor.get_string(index)? {
                Some(text) => FieldValue::DateTime(precision.parse(&text)?),
                None => FieldValue::Null,
            },
            // a missing instant stays missing instead of becoming the epoch
            Self::EpochMillis if cursor.is_null(index) => FieldValue::Null,
            Self::EpochMillis => FieldValue::DateTime(from_epoch_millis(cursor.get_long(index)?)?),
            Self::Ordinal { len } => {
                FieldValue::Ordinal(check_ordinal(i64::from(cursor.get_int(index)?), len)?)
            }
        };

        Ok(value)
    }

    /// Kind of `FieldValue` this codec accepts.
    #[must_use]
    pub const fn field_kind(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Double => "double",
            Self::CalendarText(_) | Self::EpochMillis => "date",
            Self::Ordinal { .. } => "ordinal",
        }
    }
}

fn check_ordinal(ordinal: i64, len: usize) -> Result<usize, CoreError> {
    usize::try_from(ordinal)
        .ok()
        .filter(|o| *o < len)
        .ok_or(CoreError::OrdinalOutOfRange { ordinal, len })
}

fn to_epoch_millis(value: PrimitiveDateTime) -> Result<i64, CoreError> {
    let nanos = value.assume_utc().unix_timestamp_nanos();

    i64::try_from(nanos.div_euclid(NANOS_PER_MILLI)).map_err(|e| CoreError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn from_epoch_millis(ms: i64) -> Result<PrimitiveDateTime, CoreError> {
    let instant = OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * NANOS_PER_MILLI)
        .map_err(|e| CoreError::InvalidDate {
            value: ms.to_string(),
            reason: e.to_string(),
        })?;

    Ok(PrimitiveDateTime::new(instant.date(), instant.time()))
}

///
/// TESTS
///
