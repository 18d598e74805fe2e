//! In-memory storage: row tables and name indices

pub mod name_index;
pub mod table;

pub use name_index::NameIndex;
pub use table::{RowId, Table};
