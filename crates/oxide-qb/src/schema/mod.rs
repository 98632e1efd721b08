//! Schema elements: columns, tables, constraints and the metadata registry.
//!
//! These are the sources of column and table references for the clause
//! model. A column refers to its table by name only; the table owns its
//! columns.

mod column;
mod constraint;
mod metadata;
mod table;

pub use column::{column, ColumnElem, ColumnOptions};
pub use constraint::{ForeignKeyAction, ForeignKeyConstraint, IndexElem, UniqueKeyConstraint};
pub use metadata::MetaData;
pub use table::{table, TableElem};
