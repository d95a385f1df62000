//! Dataset parsing module.

mod reader;
mod options;

pub use reader::{parse_cell, parse_file, parse_reader};
pub use options::{ErrorMode, ParseOptions};
