//! Table types.

use super::{CellValue, Column, ColumnData};
use crate::error::{Error, Result};
use crate::parser::{self, ParseOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// A rectangular dataset of named, uniformly typed columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Columns in display order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from columns.
    ///
    /// Every column must have the same length and a unique name.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
                return Err(Error::Dataset(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    rows
                )));
            }
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::Dataset(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Create a table with the given column names and no rows.
    ///
    /// The columns are typed as text.
    pub fn empty_with_columns<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            columns: names
                .iter()
                .map(|n| Column::new(n.as_ref(), ColumnData::Text(Vec::new())))
                .collect(),
        }
    }

    /// Load a table from a CSV file with default parse options.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        parser::parse_file(path, &ParseOptions::default())
    }

    /// Load a table from any CSV reader with default parse options.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_reader(reader, &ParseOptions::default())
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count() == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column by name, failing with [`Error::ColumnNotFound`].
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Get all cells of a row.
    pub fn row(&self, index: usize) -> Option<Vec<CellValue>> {
        if index >= self.row_count() {
            return None;
        }
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    /// Build a new table from the given row indices, in that order.
    pub fn select_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.select(rows)).collect(),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let end = n.min(self.row_count());
        self.select_rows(&(0..end).collect::<Vec<_>>())
    }

    /// Last `n` rows.
    pub fn tail(&self, n: usize) -> Table {
        let total = self.row_count();
        let start = total.saturating_sub(n);
        self.select_rows(&(start..total).collect::<Vec<_>>())
    }

    /// Columns whose kind takes part in numeric summaries.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind().is_numeric())
    }

    /// Columns whose kind takes part in categorical summaries.
    pub fn categorical_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind().is_categorical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::integer("age", [25, 30, 35, 40, 45]),
            Column::text("gender", ["M", "F", "M", "F", "M"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = sample();
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["age", "gender"]);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let result = Table::from_columns(vec![
            Column::integer("a", [1, 2]),
            Column::integer("b", [1]),
        ]);
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_from_columns_rejects_duplicate_names() {
        let result = Table::from_columns(vec![
            Column::integer("a", [1]),
            Column::integer("a", [2]),
        ]);
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_head_and_tail() {
        let table = sample();
        let head = table.head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.row(0).unwrap()[0], CellValue::Integer(25));

        let tail = table.tail(2);
        assert_eq!(tail.row_count(), 2);
        assert_eq!(tail.row(1).unwrap()[0], CellValue::Integer(45));

        assert_eq!(table.head(10).row_count(), 5);
    }

    #[test]
    fn test_empty_tables() {
        assert!(Table::new().is_empty());
        let no_rows = Table::empty_with_columns(&["class", "proportion"]);
        assert!(no_rows.is_empty());
        assert_eq!(no_rows.column_count(), 2);
    }

    #[test]
    fn test_require_column() {
        let table = sample();
        assert!(table.require_column("age").is_ok());
        assert!(matches!(
            table.require_column("salary"),
            Err(Error::ColumnNotFound(name)) if name == "salary"
        ));
    }
}
