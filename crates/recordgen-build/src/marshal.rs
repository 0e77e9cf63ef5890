//! Type marshalling table: how each semantic type moves through the property
//! bag and the row cursor.

use recordgen_config::DateMode;
use recordgen_core::codec::{Codec, DatePrecision};
use recordgen_schema::types::SemanticType;
use serde::Serialize;

///
/// EnumInfo
///
/// Enough of an enum type to marshal it by ordinal.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EnumInfo<'a> {
    pub type_name: &'a str,
    pub len: usize,
}

///
/// MarshalExprs
///
/// The marshalling triple of one column, all three against the same key
/// constant and the same codec.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MarshalExprs {
    /// Statement writing the field into `values`.
    pub to_bag: String,

    /// Expression reading the field from `values`.
    pub from_bag: String,

    /// Expression reading the field from `cursor`.
    pub from_cursor: String,

    pub codec: Codec,
}

///
/// MarshalOutcome
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum MarshalOutcome {
    Mapped(MarshalExprs),

    /// No branch for this type; callers decide whether that is fatal.
    Unsupported(SemanticType),
}

impl MarshalOutcome {
    /// The triple, with placeholder text standing in for an unsupported type.
    #[must_use]
    pub fn into_exprs_or_placeholder(self) -> (String, String, String, Option<Codec>) {
        match self {
            Self::Mapped(e) => (e.to_bag, e.from_bag, e.from_cursor, Some(e.codec)),
            Self::Unsupported(ty) => {
                let marker = placeholder(ty);
                (marker.clone(), marker.clone(), marker, None)
            }
        }
    }
}

/// Inert, visibly marked text emitted instead of a marshalling expression.
#[must_use]
pub fn placeholder(ty: SemanticType) -> String {
    format!("[[UNHANDLED FIELD TYPE: {ty}]]")
}

/// Codec for a column, or `None` when the type has no marshalling branch.
#[must_use]
pub fn codec_for(
    ty: SemanticType,
    enum_info: Option<EnumInfo<'_>>,
    mode: DateMode,
) -> Option<Codec> {
    if let Some(info) = enum_info {
        return Some(Codec::Ordinal { len: info.len });
    }

    let codec = match ty {
        SemanticType::Integer => Codec::Int,
        SemanticType::Long => Codec::Long,
        SemanticType::Text | SemanticType::Clob => Codec::Text,
        SemanticType::Boolean => Codec::Bool,
        SemanticType::Float => Codec::Float,
        SemanticType::Double => Codec::Double,
        SemanticType::Date => Codec::CalendarText(match mode {
            DateMode::Legacy => DatePrecision::Seconds,
            DateMode::DateTime => DatePrecision::Millis,
        }),
        SemanticType::Timestamp | SemanticType::Time => Codec::EpochMillis,
        SemanticType::Blob => return None,
    };

    Some(codec)
}

/// Build the marshalling triple for field `var` stored under constant `key`.
#[must_use]
pub fn marshal_expr(
    var: &str,
    key: &str,
    ty: SemanticType,
    enum_info: Option<EnumInfo<'_>>,
    mode: DateMode,
) -> MarshalOutcome {
    let Some(codec) = codec_for(ty, enum_info, mode) else {
        return MarshalOutcome::Unsupported(ty);
    };

    let bag = |getter: &str| format!("values.{getter}({key})");
    let column = format!("cursor.getColumnIndex({key})");
    let cursor = |getter: &str| format!("cursor.{getter}({column})");

    let (value, from_bag, from_cursor) = match codec {
        Codec::Ordinal { .. } => {
            // enum_info is always present for an ordinal codec
            let enum_type = enum_info.map_or("", |info| info.type_name);
            (
                format!("{var}.ordinal()"),
                format!("{enum_type}.values()[{}]", bag("getAsInteger")),
                format!("{enum_type}.values()[{}]", cursor("getInt")),
            )
        }
        Codec::Int => (var.to_string(), bag("getAsInteger"), cursor("getInt")),
        Codec::Long => (var.to_string(), bag("getAsLong"), cursor("getLong")),
        Codec::Text => (var.to_string(), bag("getAsString"), cursor("getString")),
        Codec::Bool => (
            var.to_string(),
            bag("getAsBoolean"),
            format!("{} != 0 ? true : false", cursor("getInt")),
        ),
        Codec::Float => (var.to_string(), bag("getAsFloat"), cursor("getFloat")),
        Codec::Double => (var.to_string(), bag("getAsDouble"), cursor("getDouble")),
        Codec::CalendarText(_) => {
            let (write, read) = match mode {
                DateMode::Legacy => ("dateToDBString", "dbStringToDate"),
                DateMode::DateTime => ("dateTimeToDBString", "dbStringToDateTime"),
            };
            (
                format!("{write}({var})"),
                format!("{read}({})", bag("getAsString")),
                format!("{read}({})", cursor("getString")),
            )
        }
        Codec::EpochMillis => {
            let (instant, millis) = match mode {
                DateMode::Legacy => ("java.util.Date", "getTime"),
                DateMode::DateTime => ("org.joda.time.DateTime", "getMillis"),
            };
            (
                format!("{var} != null ? {var}.{millis}() : null"),
                format!("new {instant}({})", bag("getAsLong")),
                format!(
                    "!cursor.isNull({column}) ? new {instant}({}) : null",
                    cursor("getLong")
                ),
            )
        }
    };

    MarshalOutcome::Mapped(MarshalExprs {
        to_bag: format!("values.put({key}, {value});"),
        from_bag,
        from_cursor,
        codec,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(outcome: MarshalOutcome) -> MarshalExprs {
        match outcome {
            MarshalOutcome::Mapped(exprs) => exprs,
            MarshalOutcome::Unsupported(ty) => panic!("{ty} should be mapped"),
        }
    }

    #[test]
    fn text_marshals_through_string_accessors() {
        let exprs = mapped(marshal_expr(
            "firstName",
            "C_FIRST_NAME",
            SemanticType::Text,
            None,
            DateMode::Legacy,
        ));

        assert_eq!(exprs.to_bag, "values.put(C_FIRST_NAME, firstName);");
        assert_eq!(exprs.from_bag, "values.getAsString(C_FIRST_NAME)");
        assert_eq!(
            exprs.from_cursor,
            "cursor.getString(cursor.getColumnIndex(C_FIRST_NAME))"
        );
        assert_eq!(exprs.codec, Codec::Text);
    }

    #[test]
    fn boolean_cursor_read_compares_against_zero() {
        let exprs = mapped(marshal_expr(
            "active",
            "C_ACTIVE",
            SemanticType::Boolean,
            None,
            DateMode::Legacy,
        ));

        assert_eq!(exprs.from_bag, "values.getAsBoolean(C_ACTIVE)");
        assert_eq!(
            exprs.from_cursor,
            "cursor.getInt(cursor.getColumnIndex(C_ACTIVE)) != 0 ? true : false"
        );
    }

    #[test]
    fn date_modes_pick_different_codecs() {
        let legacy = mapped(marshal_expr(
            "born",
            "C_BORN",
            SemanticType::Date,
            None,
            DateMode::Legacy,
        ));
        assert_eq!(legacy.to_bag, "values.put(C_BORN, dateToDBString(born));");
        assert_eq!(legacy.codec, Codec::CalendarText(DatePrecision::Seconds));

        let modern = mapped(marshal_expr(
            "born",
            "C_BORN",
            SemanticType::Date,
            None,
            DateMode::DateTime,
        ));
        assert_eq!(modern.from_bag, "dbStringToDateTime(values.getAsString(C_BORN))");
        assert_eq!(modern.codec, Codec::CalendarText(DatePrecision::Millis));
    }

    #[test]
    fn timestamps_null_check_the_cursor() {
        let exprs = mapped(marshal_expr(
            "seen",
            "C_SEEN",
            SemanticType::Timestamp,
            None,
            DateMode::Legacy,
        ));

        assert_eq!(exprs.to_bag, "values.put(C_SEEN, seen != null ? seen.getTime() : null);");
        assert_eq!(exprs.from_bag, "new java.util.Date(values.getAsLong(C_SEEN))");
        assert!(
            exprs.from_cursor.starts_with("!cursor.isNull(cursor.getColumnIndex(C_SEEN)) ?"),
            "got {}",
            exprs.from_cursor
        );
        assert_eq!(exprs.codec, Codec::EpochMillis);
    }

    #[test]
    fn enums_marshal_by_ordinal() {
        let info = EnumInfo {
            type_name: "Status",
            len: 2,
        };
        let exprs = mapped(marshal_expr(
            "status",
            "C_STATUS",
            SemanticType::Integer,
            Some(info),
            DateMode::Legacy,
        ));

        assert_eq!(exprs.to_bag, "values.put(C_STATUS, status.ordinal());");
        assert_eq!(exprs.from_bag, "Status.values()[values.getAsInteger(C_STATUS)]");
        assert_eq!(
            exprs.from_cursor,
            "Status.values()[cursor.getInt(cursor.getColumnIndex(C_STATUS))]"
        );
        assert_eq!(exprs.codec, Codec::Ordinal { len: 2 });
    }

    #[test]
    fn blob_is_unsupported_with_placeholder() {
        let outcome = marshal_expr("photo", "C_PHOTO", SemanticType::Blob, None, DateMode::Legacy);
        assert_eq!(outcome, MarshalOutcome::Unsupported(SemanticType::Blob));

        let (to_bag, from_bag, from_cursor, codec) = outcome.into_exprs_or_placeholder();
        assert_eq!(from_bag, "[[UNHANDLED FIELD TYPE: Blob]]");
        assert_eq!(to_bag, from_bag);
        assert_eq!(from_cursor, from_bag);
        assert!(codec.is_none());
    }

    #[test]
    fn clob_shares_the_string_branch() {
        assert_eq!(codec_for(SemanticType::Clob, None, DateMode::Legacy), Some(Codec::Text));
    }
}
