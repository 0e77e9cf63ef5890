use recordgen_schema::{error::ErrorTree, types::SemanticType};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Schema(#[from] recordgen_schema::Error),

    #[error("schema validation failed: {0}")]
    Validation(ErrorTree),

    #[error("table '{table}' has more than one primary key (second is '{field}')")]
    DuplicatePrimaryKey { table: String, field: String },

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("table '{table}' field '{field}': no marshalling for type {ty}")]
    UnsupportedType {
        table: String,
        field: String,
        ty: SemanticType,
    },
}
