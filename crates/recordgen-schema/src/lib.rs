pub mod ddl;
pub mod error;
pub mod mapping;
pub mod node;
pub mod types;
pub mod validate;

/// Separator used by stored column and table identifiers.
pub const NAME_SEPARATOR: char = '_';

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{ForeignKeyType, SemanticType},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("schema parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("schema validation failed: {0}")]
    Validation(ErrorTree),
}
