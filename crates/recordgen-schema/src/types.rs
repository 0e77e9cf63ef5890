use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// SemanticType
///
/// Normalized logical type of a column, independent of the raw stored type token.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum SemanticType {
    Blob,
    Boolean,
    Clob,
    Date,
    Double,
    Float,
    Integer,
    Long,
    #[serde(rename = "string", alias = "text")]
    Text,
    Time,
    Timestamp,
}

impl SemanticType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Float | Self::Double)
    }

    // is_integral
    // only integral keys can auto-increment
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Integer | Self::Long)
    }

    #[must_use]
    pub const fn is_date_family(self) -> bool {
        matches!(self, Self::Date | Self::Timestamp | Self::Time)
    }

    /// Binary and character large objects are left out of string representations.
    #[must_use]
    pub const fn is_large_object(self) -> bool {
        matches!(self, Self::Blob | Self::Clob)
    }
}

///
/// ForeignKeyType
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyType {
    #[default]
    None,
    ManyToOne,
    OneToMany,
    OneToOne,
    Ignore,
}

impl ForeignKeyType {
    /// Relationship kinds that need a resolvable target table.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToMany | Self::OneToOne)
    }
}
