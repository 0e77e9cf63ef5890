//! Schema validation orchestration and shared helpers.

pub mod naming;
pub mod primary_key;
pub mod relation;

use crate::{Error, prelude::*};

/// Run full schema validation in a staged, deterministic order.
pub fn validate_database(database: &Database) -> Result<(), Error> {
    // Phase 1: validate each table on its own.
    let mut errors = ErrorTree::new();
    for table in &database.tables {
        errors.add_route(table.name.clone(), validate_table(table));
    }

    // Phase 2: enforce database-wide invariants.
    validate_global(database, &mut errors);

    errors.result().map_err(Error::Validation)
}

// Local invariants that only need one table.
fn validate_table(table: &Table) -> ErrorTree {
    let mut errs = ErrorTree::new();

    naming::validate_field_names(table, &mut errs);
    primary_key::validate_primary_key(table, &mut errs);

    if table.enumeration_table && table.enums.is_empty() {
        err!(errs, "enumeration table declares no literals");
    }

    errs
}

// Passes that require a full database view.
fn validate_global(database: &Database, errs: &mut ErrorTree) {
    naming::validate_table_names(database, errs);
    relation::validate_relations(database, errs);
}
