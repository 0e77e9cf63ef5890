use crate::BuildError;
use recordgen_schema::prelude::*;

///
/// FieldRole
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldRole {
    Scalar,
    Enumerated,
    ManyToOne,
    OneToOne,

    /// Child side of a one-to-many; the parent side is found by the inbound index.
    OneToMany,
    Ignored,
}

impl FieldRole {
    /// Scalar and enumerated fields get constants, accessors and marshalling.
    #[must_use]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Scalar | Self::Enumerated)
    }

    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToOne | Self::OneToMany)
    }
}

///
/// Classified
///

#[derive(Clone, Copy, Debug)]
pub struct Classified<'a> {
    pub field: &'a Field,
    pub role: FieldRole,
    pub primary_key: bool,
}

/// Decide the role of every field, in declaration order.
///
/// A second primary key is fatal.
pub fn classify_fields(table: &Table) -> Result<Vec<Classified<'_>>, BuildError> {
    let mut primary_key_seen = false;
    let mut out = Vec::with_capacity(table.fields.len());

    for field in &table.fields {
        if field.primary_key {
            if primary_key_seen {
                return Err(BuildError::DuplicatePrimaryKey {
                    table: table.name.clone(),
                    field: field.name.clone(),
                });
            }
            primary_key_seen = true;
        }

        let role = role_of(table, field);
        tracing::debug!(table = %table.name, field = %field.name, ?role, "classified field");

        out.push(Classified {
            field,
            role,
            primary_key: field.primary_key,
        });
    }

    Ok(out)
}

fn role_of(table: &Table, field: &Field) -> FieldRole {
    match field.foreign_key {
        ForeignKeyType::ManyToOne => FieldRole::ManyToOne,
        ForeignKeyType::OneToOne => FieldRole::OneToOne,
        ForeignKeyType::OneToMany => FieldRole::OneToMany,
        ForeignKeyType::Ignore => FieldRole::Ignored,
        ForeignKeyType::None if field.enumeration && field.ty.is_numeric() => FieldRole::Enumerated,
        ForeignKeyType::None => {
            if field.enumeration {
                tracing::warn!(
                    table = %table.name,
                    field = %field.name,
                    ty = %field.ty,
                    "enumeration flag ignored on a non-numeric column"
                );
            }
            FieldRole::Scalar
        }
    }
}

///
/// TESTS
///
