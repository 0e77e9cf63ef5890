//! Runtime vocabulary targeted by generated record classes.
//!
//! The generator decides how each column is marshalled; this crate executes
//! those decisions against an in-memory property bag and row cursor.

pub mod bag;
pub mod codec;
pub mod cursor;
pub mod error;
pub mod relation;
pub mod value;

pub use error::CoreError;

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Strictness,
        bag::PropertyBag,
        codec::{Codec, DatePrecision},
        cursor::{MemoryCursor, RowCursor},
        error::CoreError,
        relation::{OneToMany, PersistenceContext},
        value::{FieldValue, Stored, Value},
    };
}

///
/// Strictness
///
/// Whether a suppressible failure is absorbed or surfaced to the caller.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    #[display("lenient")]
    Lenient,

    #[display("strict")]
    Strict,
}

impl Strictness {
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}
