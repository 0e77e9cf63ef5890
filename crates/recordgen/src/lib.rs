//! ## Crate layout
//! - `build`: field classification, marshalling, and record class assembly.
//! - `config`: generation switches and strictness levels.
//! - `core`: runtime vocabulary generated records rely on (property bag,
//!   row cursor, codecs, one-to-many membership).
//! - `schema`: schema model, type mapping, DDL, and validation.
//!
//! Most callers only need `prelude` and [`generate`].

pub use recordgen_build as build;
pub use recordgen_config as config;
pub use recordgen_core as core;
pub use recordgen_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use recordgen_build::{BuildError, Generator, generate};

///
/// Prelude
///

pub mod prelude {
    pub use crate::build::prelude::*;
    pub use crate::config::{DateMode, GenConfig};
    pub use crate::core::Strictness;
    pub use crate::schema::prelude::{Database, Field, SemanticType, Table};
}
