use crate::{NAME_SEPARATOR, prelude::*};
use std::collections::BTreeSet;

/// Check a raw identifier can be normalized.
pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.ends_with(NAME_SEPARATOR) {
        return Err(format!("name must not end with '{NAME_SEPARATOR}'"));
    }
    if !name.is_ascii() {
        return Err(format!("name '{name}' must be ASCII"));
    }

    Ok(())
}

pub fn validate_field_names(table: &Table, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for field in &table.fields {
        let mut field_errs = ErrorTree::new();
        if let Err(message) = validate_name(&field.name) {
            field_errs.add(message);
        }
        if !seen.insert(field.name.as_str()) {
            err!(field_errs, "duplicate field name '{}'", field.name);
        }

        errs.add_route(field.name.clone(), field_errs);
    }
}

pub fn validate_table_names(database: &Database, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for table in &database.tables {
        if let Err(message) = validate_name(&table.name) {
            err!(errs, "table '{}': {message}", table.name);
        }
        if !seen.insert(table.name.as_str()) {
            err!(errs, "duplicate table name '{}'", table.name);
        }
    }
}
