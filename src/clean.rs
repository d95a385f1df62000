//! Dataset cleaning applied before summarizing.

use crate::error::{Error, Result};
use crate::model::{Column, ColumnData, ColumnKind, Table};
use crate::parser::{parse_cell, ParseOptions};
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Options for [`clean_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOptions {
    /// Text cells replaced with missing values (compared after trimming)
    pub replace_values: Vec<String>,

    /// Remove repeated rows, keeping the first occurrence
    pub drop_duplicates: bool,

    /// Lowercase column names and replace special characters with `_`
    pub standardize_columns: bool,

    /// Convert text columns whose values all parse as numbers or booleans
    pub infer_types: bool,
}

impl CleanOptions {
    /// Create clean options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder values treated as missing.
    pub fn with_replace_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.replace_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable duplicate removal.
    pub fn with_drop_duplicates(mut self, drop: bool) -> Self {
        self.drop_duplicates = drop;
        self
    }

    /// Enable or disable column name standardization.
    pub fn with_standardize_columns(mut self, standardize: bool) -> Self {
        self.standardize_columns = standardize;
        self
    }

    /// Enable or disable type inference on text columns.
    pub fn with_infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            replace_values: vec!["?".to_string(), "NA".to_string(), "-".to_string()],
            drop_duplicates: true,
            standardize_columns: true,
            infer_types: true,
        }
    }
}

/// Cleaning pipeline with its compiled patterns.
pub struct CleanPipeline {
    options: CleanOptions,
    separator: Regex,
}

impl CleanPipeline {
    /// Create a pipeline.
    pub fn new(options: CleanOptions) -> Result<Self> {
        let separator =
            Regex::new(r"[^a-z0-9]+").map_err(|e| Error::Validation(e.to_string()))?;
        Ok(Self { options, separator })
    }

    /// Standardize one column name.
    ///
    /// The name is decomposed (NFKD), stripped of non-ASCII marks and
    /// lowercased; runs of other characters become a single `_`.
    pub fn standardize_name(&self, name: &str) -> String {
        let ascii: String = name.nfkd().filter(char::is_ascii).collect();
        let lowered = ascii.to_lowercase();
        self.separator
            .replace_all(&lowered, "_")
            .trim_matches('_')
            .to_string()
    }

    /// Run every enabled step over `table`.
    pub fn clean(&self, table: &Table) -> Table {
        let mut columns: Vec<Column> = table
            .columns
            .iter()
            .map(|c| self.replace_placeholders(c))
            .collect();

        if self.options.infer_types {
            columns = columns.into_iter().map(infer_column).collect();
        }

        let mut cleaned = Table { columns };

        if self.options.drop_duplicates {
            let before = cleaned.row_count();
            cleaned = drop_duplicate_rows(&cleaned);
            let dropped = before - cleaned.row_count();
            if dropped > 0 {
                log::debug!("Dropped {} duplicate rows", dropped);
            }
        }

        if self.options.standardize_columns {
            self.standardize_names(&mut cleaned);
        }

        cleaned
    }

    fn replace_placeholders(&self, column: &Column) -> Column {
        match &column.data {
            ColumnData::Text(values) if !self.options.replace_values.is_empty() => {
                let replaced = values
                    .iter()
                    .map(|cell| {
                        cell.as_ref()
                            .filter(|text| !self.options.replace_values.iter().any(|p| p == text.trim()))
                            .cloned()
                    })
                    .collect();
                Column::new(column.name.clone(), ColumnData::Text(replaced))
            }
            _ => column.clone(),
        }
    }

    fn standardize_names(&self, table: &mut Table) {
        let mut seen: HashSet<String> = HashSet::new();
        for (index, column) in table.columns.iter_mut().enumerate() {
            let mut base = self.standardize_name(&column.name);
            if base.is_empty() {
                base = format!("column_{}", index);
            }

            let mut name = base.clone();
            let mut suffix = 2;
            while !seen.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            column.name = name;
        }
    }
}

/// Clean a dataset with the given options.
pub fn clean_data(table: &Table, options: &CleanOptions) -> Result<Table> {
    let pipeline = CleanPipeline::new(options.clone())?;
    Ok(pipeline.clean(table))
}

/// Standardize a single column name the way [`clean_data`] does.
pub fn standardize_column_name(name: &str) -> Result<String> {
    Ok(CleanPipeline::new(CleanOptions::default())?.standardize_name(name))
}

fn infer_column(column: Column) -> Column {
    let ColumnData::Text(values) = &column.data else {
        return column;
    };

    let options = ParseOptions::default();
    let cells = values
        .iter()
        .map(|cell| match cell {
            Some(text) => parse_cell(text, &options),
            None => crate::model::CellValue::Null,
        })
        .collect();
    let inferred = Column::from_cells(column.name.clone(), cells);

    if inferred.kind() == ColumnKind::Text || inferred.null_count() != column.null_count() {
        column
    } else {
        inferred
    }
}

fn drop_duplicate_rows(table: &Table) -> Table {
    let mut seen: HashSet<String> = HashSet::new();
    let keep: Vec<usize> = (0..table.row_count())
        .filter(|&i| {
            let key = table
                .columns
                .iter()
                .filter_map(|c| c.get(i))
                .map(|v| format!("{:?}", v))
                .collect::<Vec<_>>()
                .join("\u{1f}");
            seen.insert(key)
        })
        .collect();

    if keep.len() == table.row_count() {
        table.clone()
    } else {
        table.select_rows(&keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_standardize_names() {
        let pipeline = CleanPipeline::new(CleanOptions::default()).unwrap();
        assert_eq!(pipeline.standardize_name("Age"), "age");
        assert_eq!(pipeline.standardize_name("Annual Salary ($)"), "annual_salary");
        assert_eq!(pipeline.standardize_name("Café Name"), "cafe_name");
        assert_eq!(pipeline.standardize_name("__x--y__"), "x_y");
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let table = Table::from_columns(vec![
            Column::integer("A b", [1]),
            Column::integer("a_b", [2]),
            Column::integer("%%", [3]),
        ])
        .unwrap();
        let cleaned = clean_data(&table, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.column_names(), vec!["a_b", "a_b_2", "column_2"]);
    }

    #[test]
    fn test_placeholders_and_inference() {
        let table = Table::from_columns(vec![Column::text("score", ["1", "?", "3", "NA"])]).unwrap();
        let options = CleanOptions::default().with_drop_duplicates(false);
        let cleaned = clean_data(&table, &options).unwrap();

        let column = cleaned.column("score").unwrap();
        assert_eq!(column.kind(), ColumnKind::Integer);
        assert_eq!(column.null_count(), 2);
        assert_eq!(column.get(2), Some(CellValue::Integer(3)));
    }

    #[test]
    fn test_drop_duplicates() {
        let table = Table::from_columns(vec![
            Column::integer("a", [1, 1, 2]),
            Column::text("b", ["x", "x", "x"]),
        ])
        .unwrap();
        let cleaned = clean_data(&table, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_everything_disabled() {
        let table = Table::from_columns(vec![Column::text("Mixed Case", ["?", "?"])]).unwrap();
        let options = CleanOptions::new()
            .with_replace_values(Vec::<String>::new())
            .with_drop_duplicates(false)
            .with_standardize_columns(false)
            .with_infer_types(false);
        let cleaned = clean_data(&table, &options).unwrap();
        assert_eq!(cleaned, table);
    }

    #[test]
    fn test_standardize_column_name() {
        assert_eq!(standardize_column_name("Gender").unwrap(), "gender");
    }
}
