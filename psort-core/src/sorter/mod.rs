//! Group-aware block sorting.
//!
//! - `statement`: recognizes block lines and extracts their import path
//! - `groups`: resolves an import path to a group index
//! - `block`: stable sort by (group, trimmed text) plus optional separators

pub mod block;
pub mod groups;
pub mod statement;

pub use block::BlockSorter;
pub use groups::GroupTable;
pub use statement::{StatementLine, StatementSyntax};
