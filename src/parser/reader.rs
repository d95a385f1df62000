//! CSV dataset reader.

use super::options::{ErrorMode, ParseOptions};
use crate::error::{Error, Result};
use crate::model::{CellValue, Column, Table};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a CSV file into a table.
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    log::debug!("Reading dataset {}", path.display());
    parse_reader(BufReader::new(file), options)
}

/// Read CSV data from any reader into a table.
///
/// Each column's kind is inferred from its non-missing cells: integers,
/// floats (integers widen), booleans, or text for anything else.
pub fn parse_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(options.error_mode == ErrorMode::Lenient)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let mut names: Vec<String> = if options.has_headers {
        csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    let mut rows = 0usize;

    for record in csv_reader.records() {
        if options.max_rows.is_some_and(|max| rows >= max) {
            break;
        }
        let record = record?;

        if names.is_empty() && !options.has_headers {
            names = (0..record.len()).map(|i| format!("column_{}", i)).collect();
            cells = vec![Vec::new(); names.len()];
        }

        for (i, column) in cells.iter_mut().enumerate() {
            let value = match record.get(i) {
                Some(text) => parse_cell(text, options),
                None => CellValue::Null,
            };
            column.push(value);
        }
        rows += 1;
    }

    if names.is_empty() {
        return Err(Error::Dataset("the dataset has no columns".to_string()));
    }

    log::debug!("Parsed {} rows x {} columns", rows, names.len());

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::from_cells(name, values))
        .collect();
    Table::from_columns(columns)
}

/// Parse a single cell text into a typed value.
pub fn parse_cell(text: &str, options: &ParseOptions) -> CellValue {
    let trimmed = text.trim();
    if options.is_null_text(trimmed) {
        return CellValue::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return CellValue::Integer(v);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        if v.is_nan() {
            return CellValue::Null;
        }
        return CellValue::Float(v);
    }
    CellValue::Text(text.to_string())
}
