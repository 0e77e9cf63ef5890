mod database;
mod field;
mod table;

pub use database::*;
pub use field::*;
pub use table::*;
