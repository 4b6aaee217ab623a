//! Pedigree data model: normalized values, records and the ancestry graph.
//!
//! Everything here is pure; reading files and printing results live elsewhere.

pub mod ancestry;
pub mod normalize;
pub mod table;

pub use ancestry::AncestryIndex;
pub use normalize::{CellValue, Identifier, Normalizer, ParentRef, UNKNOWN_SENTINELS};
pub use table::{ColumnMapping, ColumnRef, ParentRole, PedigreeTable, RawTable, Record, Role, TableError};
