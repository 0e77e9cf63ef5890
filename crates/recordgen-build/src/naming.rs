//! Identifier and constant naming for generated classes.

use recordgen_schema::{NAME_SEPARATOR, prelude::*};
use std::collections::BTreeMap;

/// Prefix of a stored-column-name constant.
pub const COLUMN_PREFIX: &str = "C_";

/// Prefix of a fully-qualified-column-name constant.
pub const FULL_COLUMN_PREFIX: &str = "FULL_C_";

/// Convert a raw column or table identifier into identifier case.
///
/// ALL-CAPS input is lowercased first. A separator is dropped and the character
/// after it is upper-cased, unless nothing has been written yet. A trailing
/// separator has no following character and is dropped.
#[must_use]
pub fn to_identifier_case(raw: &str) -> String {
    let mut letters = raw.chars().filter(|c| c.is_alphabetic()).peekable();
    let all_upper = letters.peek().is_some() && letters.all(char::is_uppercase);
    let source = if all_upper {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if c != NAME_SEPARATOR {
            out.push(c);
            continue;
        }

        // the separator consumes the next character, whatever it is
        let Some(next) = chars.next() else { break };
        if out.is_empty() {
            out.push(next);
        } else {
            out.extend(next.to_uppercase());
        }
    }

    out
}

/// Convert an identifier-case name into constant case.
///
/// A separator goes before every uppercase letter that follows a lowercase one.
#[must_use]
pub fn to_constant_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev: Option<char> = None;

    for c in identifier.chars() {
        if c.is_uppercase() && prev.is_some_and(char::is_lowercase) {
            out.push(NAME_SEPARATOR);
        }
        out.extend(c.to_uppercase());
        prev = Some(c);
    }

    out
}

/// Upper-case the first character.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lower-case the first character.
#[must_use]
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[must_use]
pub fn getter_name(var: &str, boolean: bool) -> String {
    let prefix = if boolean { "is" } else { "get" };

    format!("{prefix}{}", capitalize(var))
}

#[must_use]
pub fn setter_name(var: &str) -> String {
    format!("set{}", capitalize(var))
}

/// `C_<CONSTANT>` for a field's identifier.
#[must_use]
pub fn column_constant(identifier: &str) -> String {
    format!("{COLUMN_PREFIX}{}", to_constant_case(identifier))
}

/// `FULL_C_<CONSTANT>` for a field's identifier.
#[must_use]
pub fn full_column_constant(identifier: &str) -> String {
    format!("{FULL_COLUMN_PREFIX}{}", to_constant_case(identifier))
}

/// Report columns whose generated constant names collide.
#[must_use]
pub fn validate_constant_names(table: &Table) -> ErrorTree {
    let mut errs = ErrorTree::new();
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    let columns = table
        .fields
        .iter()
        .filter(|f| !f.references_table() && f.foreign_key != ForeignKeyType::Ignore);

    for field in columns {
        let constant = column_constant(&to_identifier_case(&field.name));

        if let Some(first) = seen.get(constant.as_str()) {
            err!(
                errs,
                "field '{}' generates constant {constant}, already used by '{first}'",
                field.name
            );
        } else {
            seen.insert(constant, &field.name);
        }
    }

    errs
}

/// Report relationship variables that clash with another record variable.
///
/// Column-against-column clashes are already caught as constant collisions.
#[must_use]
pub fn validate_member_names(database: &Database, table: &Table) -> ErrorTree {
    let mut errs = ErrorTree::new();
    let mut seen: BTreeMap<String, (&str, bool)> = BTreeMap::new();

    for field in table.fields.iter().filter(|f| f.foreign_key != ForeignKeyType::Ignore) {
        let is_reference = field.references_table();
        let member = if is_reference {
            crate::relation::reference_var_name(database, table, field)
        } else {
            Some(to_identifier_case(&field.name))
        };
        let Some(member) = member else {
            continue;
        };

        match seen.get(member.as_str()) {
            Some((first, first_is_reference)) if is_reference || *first_is_reference => err!(
                errs,
                "field '{}' generates variable '{member}', already used by '{first}'; set var_name",
                field.name
            ),
            Some(_) => {}
            None => {
                seen.insert(member, (&field.name, is_reference));
            }
        }
    }

    errs
}

///
/// TESTS
///
