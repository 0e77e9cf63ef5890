//! Record class generation: turns a validated schema into class models for a
//! code emitter.

pub mod classify;
pub mod emit;
pub mod enumeration;
pub mod error;
pub mod marshal;
pub mod model;
pub mod naming;
pub mod record;
pub mod relation;
pub mod test_gen;

pub use error::BuildError;

use crate::{emit::GeneratedTable, record::RecordGenerator, relation::InboundIndex};
use recordgen_config::GenConfig;
use recordgen_schema::{
    ddl::{DdlRenderer, SqliteDdlRenderer},
    mapping::{SqliteTypeMapping, TypeMapping},
    prelude::*,
    validate::validate_database,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        BuildError, Generator,
        emit::{CodeEmitter, GeneratedTable, emit_all},
        model::{ClassKind, ClassModel, Constant, FieldVar, Method},
    };
}

/// Generate every table of `database` with the SQLite mapping.
pub fn generate(
    database: &Database,
    config: &GenConfig,
) -> Result<Vec<GeneratedTable>, BuildError> {
    Generator::new(config.clone()).generate(database)
}

///
/// Generator
///
/// Owns the configuration and the target seams for one generation run.
///

pub struct Generator {
    config: GenConfig,
    mapping: Box<dyn TypeMapping>,
    ddl: Box<dyn DdlRenderer>,
}

impl Generator {
    #[must_use]
    pub fn new(config: GenConfig) -> Self {
        Self {
            config,
            mapping: Box::new(SqliteTypeMapping),
            ddl: Box::new(SqliteDdlRenderer),
        }
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: impl TypeMapping + 'static) -> Self {
        self.mapping = Box::new(mapping);
        self
    }

    #[must_use]
    pub fn with_ddl(mut self, ddl: impl DdlRenderer + 'static) -> Self {
        self.ddl = Box::new(ddl);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Validate the schema, then generate each table in declaration order.
    pub fn generate(&self, database: &Database) -> Result<Vec<GeneratedTable>, BuildError> {
        validate(database)?;

        let inbound = InboundIndex::build(database);
        let generator = RecordGenerator::new(
            database,
            &self.config,
            self.mapping.as_ref(),
            self.ddl.as_ref(),
            &inbound,
        );

        let generated = database
            .tables
            .iter()
            .map(|table| generator.generate_table(table))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            database = %database.name,
            tables = generated.len(),
            "generated record classes"
        );

        Ok(generated)
    }
}

/// Schema validation plus the checks only generation cares about.
pub fn validate(database: &Database) -> Result<(), BuildError> {
    let mut errs = match validate_database(database) {
        Ok(()) => ErrorTree::new(),
        Err(recordgen_schema::Error::Validation(tree)) => tree,
        Err(err) => return Err(err.into()),
    };

    for table in database.tables.iter().filter(|t| !t.enumeration_table) {
        errs.add_route(table.name.clone(), naming::validate_constant_names(table));
        errs.add_route(table.name.clone(), naming::validate_member_names(database, table));
    }

    errs.result().map_err(BuildError::Validation)
}

///
/// TESTS
///
