use crate::prelude::*;

// Validate foreign-key targets and enumeration wiring for every field.
pub fn validate_relations(database: &Database, errs: &mut ErrorTree) {
    for table in &database.tables {
        let mut table_errs = ErrorTree::new();

        for field in &table.fields {
            let mut field_errs = ErrorTree::new();
            validate_foreign_key(database, field, &mut field_errs);
            if field.enumeration {
                validate_enumeration(database, field, &mut field_errs);
            }

            table_errs.add_route(field.name.clone(), field_errs);
        }

        errs.add_route(table.name.clone(), table_errs);
    }
}

fn validate_foreign_key(database: &Database, field: &Field, errs: &mut ErrorTree) {
    if !field.references_table() {
        return;
    }

    match field.foreign_table() {
        None => err!(
            errs,
            "foreign key type {} requires a foreign key table",
            field.foreign_key
        ),
        Some(target) if database.table(target).is_none() => {
            err!(errs, "foreign key table '{target}' does not exist");
        }
        Some(_) => {}
    }
}

fn validate_enumeration(database: &Database, field: &Field, errs: &mut ErrorTree) {
    // Inline literals win; otherwise the foreign table must supply them.
    let literals: Vec<&str> = if field.enum_values.is_empty() {
        let Some(target) = field.foreign_table() else {
            err!(errs, "enumeration has neither inline values nor an enumeration table");
            return;
        };
        let Some(table) = database.table(target) else {
            err!(errs, "enumeration table '{target}' does not exist");
            return;
        };
        if !table.enumeration_table {
            err!(errs, "table '{target}' is not an enumeration table");
            return;
        }

        table.enums.iter().map(|e| e.name.as_str()).collect()
    } else {
        field.enum_values.iter().map(String::as_str).collect()
    };

    if let Some(default) = field.enum_default.as_deref()
        && !literals.contains(&default)
    {
        err!(errs, "enum default '{default}' is not a declared literal");
    }
}
