use crate::prelude::*;
use std::ops::Not;

///
/// Table
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default)]
    pub fields: Vec<Field>,

    /// Rows of this table are the literal set of an enumerated type.
    #[serde(default, rename = "enumeration", skip_serializing_if = "Not::not")]
    pub enumeration_table: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumLiteral>,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            fields: Vec::new(),
            enumeration_table: false,
            enums: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Turn this table into an enumeration table with the given literals.
    #[must_use]
    pub fn with_enums(mut self, enums: Vec<EnumLiteral>) -> Self {
        self.enumeration_table = true;
        self.enums = enums;
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First field flagged as primary key.
    #[must_use]
    pub fn primary_key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Fields of this table whose foreign key points at `target`.
    pub fn foreign_key_fields<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Field> {
        self.fields
            .iter()
            .filter(move |f| f.references_table() && f.foreign_table() == Some(target))
    }
}

///
/// EnumLiteral
///
/// One `NAME = "stored value"` pair of an enumeration table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnumLiteral {
    pub name: String,
    pub value: String,
}

impl EnumLiteral {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
