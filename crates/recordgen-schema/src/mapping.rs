use crate::types::SemanticType;
use serde::Serialize;

///
/// TargetType
///
/// Target-language representation of a semantic type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TargetType {
    pub primitive: &'static str,
    pub boxed: &'static str,
    pub is_primitive: bool,
    pub is_immutable: bool,
}

impl TargetType {
    const fn primitive(primitive: &'static str, boxed: &'static str) -> Self {
        Self {
            primitive,
            boxed,
            is_primitive: true,
            is_immutable: true,
        }
    }

    const fn object(name: &'static str, is_immutable: bool) -> Self {
        Self {
            primitive: name,
            boxed: name,
            is_primitive: false,
            is_immutable,
        }
    }

    /// Type text for a column, boxed when the column may hold null.
    #[must_use]
    pub const fn text(&self, nullable: bool) -> &'static str {
        if nullable { self.boxed } else { self.primitive }
    }

    /// Mutable reference types are copied on the way in and out of a record.
    #[must_use]
    pub const fn needs_defensive_copy(&self) -> bool {
        !self.is_primitive && !self.is_immutable
    }
}

///
/// TypeMapping
///

pub trait TypeMapping: Send + Sync {
    /// Target-language type for a semantic type.
    fn target(&self, ty: SemanticType) -> TargetType;

    /// Stored type token used in DDL when the field does not declare one.
    fn sql_type(&self, ty: SemanticType) -> &'static str;
}

///
/// SqliteTypeMapping
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteTypeMapping;

impl TypeMapping for SqliteTypeMapping {
    fn target(&self, ty: SemanticType) -> TargetType {
        match ty {
            SemanticType::Integer => TargetType::primitive("int", "Integer"),
            SemanticType::Long => TargetType::primitive("long", "Long"),
            SemanticType::Boolean => TargetType::primitive("boolean", "Boolean"),
            SemanticType::Float => TargetType::primitive("float", "Float"),
            SemanticType::Double => TargetType::primitive("double", "Double"),
            SemanticType::Text | SemanticType::Clob => TargetType::object("String", true),
            SemanticType::Date | SemanticType::Timestamp | SemanticType::Time => {
                TargetType::object("java.util.Date", false)
            }
            SemanticType::Blob => TargetType::object("byte[]", false),
        }
    }

    fn sql_type(&self, ty: SemanticType) -> &'static str {
        match ty {
            // timestamps are stored as epoch milliseconds
            SemanticType::Integer
            | SemanticType::Long
            | SemanticType::Boolean
            | SemanticType::Timestamp
            | SemanticType::Time => "INTEGER",
            SemanticType::Float | SemanticType::Double => "REAL",
            SemanticType::Text | SemanticType::Clob | SemanticType::Date => "TEXT",
            SemanticType::Blob => "BLOB",
        }
    }
}
