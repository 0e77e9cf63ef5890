use crate::prelude::*;

// A table may have zero or one primary key; auto-increment only applies to an integral key.
pub fn validate_primary_key(table: &Table, errs: &mut ErrorTree) {
    let keys = table
        .fields
        .iter()
        .filter(|f| f.primary_key)
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>();

    if keys.len() > 1 {
        err!(errs, "more than one primary key: {}", keys.join(", "));
    }

    for field in &table.fields {
        if !field.auto_increment {
            continue;
        }
        if !field.primary_key {
            err!(
                errs,
                "field '{}' is auto-increment but not the primary key",
                field.name
            );
        } else if !field.ty.is_integral() {
            err!(
                errs,
                "auto-increment primary key '{}' must be integral, got {}",
                field.name,
                field.ty
            );
        }
    }
}
