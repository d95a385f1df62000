//! Data model types.
//!
//! This module defines the in-memory dataset that summaries are computed
//! from, and the closed set of content blocks a report is assembled from.

mod block;
mod column;
mod table;
mod value;

pub use block::{Block, HeaderLevel};
pub use column::{Column, ColumnData};
pub use table::Table;
pub use value::{CellValue, ColumnKind};
