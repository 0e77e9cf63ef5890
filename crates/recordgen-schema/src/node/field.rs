use crate::prelude::*;
use std::ops::Not;

///
/// Field
///
/// One column of a table as delivered by the schema parser.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: SemanticType,

    /// Stored type token; the type mapping supplies one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub primary_key: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub auto_increment: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub enumeration: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_default: Option<String>,

    #[serde(default)]
    pub foreign_key: ForeignKeyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_table: Option<String>,

    /// Explicit relationship variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            raw_type: None,
            nullable: false,
            primary_key: false,
            auto_increment: false,
            enumeration: false,
            enum_values: Vec::new(),
            enum_default: None,
            foreign_key: ForeignKeyType::None,
            foreign_key_table: None,
            var_name: None,
            default_value: None,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as an enumeration with inline values (empty for a shared enumeration).
    #[must_use]
    pub fn enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = true;
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as an enumeration whose literals come from an enumeration table.
    #[must_use]
    pub fn shared_enumeration(mut self, table: impl Into<String>) -> Self {
        self.enumeration = true;
        self.enum_values = Vec::new();
        self.foreign_key_table = Some(table.into());
        self
    }

    #[must_use]
    pub fn enum_default(mut self, literal: impl Into<String>) -> Self {
        self.enum_default = Some(literal.into());
        self
    }

    #[must_use]
    pub fn foreign_key(mut self, kind: ForeignKeyType, table: impl Into<String>) -> Self {
        self.foreign_key = kind;
        self.foreign_key_table = Some(table.into());
        self
    }

    #[must_use]
    pub fn var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Foreign table name, treating an empty string as absent.
    #[must_use]
    pub fn foreign_table(&self) -> Option<&str> {
        self.foreign_key_table
            .as_deref()
            .filter(|table| !table.is_empty())
    }

    /// Explicit relationship variable name, treating an empty string as absent.
    #[must_use]
    pub fn explicit_var_name(&self) -> Option<&str> {
        self.var_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The declared default enum literal, or the first inline literal.
    #[must_use]
    pub fn resolved_enum_default(&self) -> Option<&str> {
        self.enum_default
            .as_deref()
            .or_else(|| self.enum_values.first().map(String::as_str))
    }

    #[must_use]
    pub const fn references_table(&self) -> bool {
        self.foreign_key.needs_target()
    }
}
