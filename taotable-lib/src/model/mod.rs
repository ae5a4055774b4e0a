//! Tabular data model: rows, data sets and sort state

mod row;
mod sort;

pub use row::*;
pub use sort::*;
