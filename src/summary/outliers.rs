//! Z-score outlier detection.

use crate::error::{Error, Result};
use crate::model::{Column, Table};
use serde::{Deserialize, Serialize};

/// Default absolute z-score above which a value is an outlier.
pub const DEFAULT_Z_CUTOFF: f64 = 3.0;

/// Outlier rows of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    /// Column name
    pub column: String,
    /// Zero-based row indices, ascending
    pub rows: Vec<usize>,
}

/// Outliers per checked column, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub columns: Vec<ColumnOutliers>,
}

impl OutlierSummary {
    /// Total number of outlier cells.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.rows.len()).sum()
    }

    /// Outlier rows of a column, if it was checked.
    pub fn rows_for(&self, column: &str) -> Option<&[usize]> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.rows.as_slice())
    }

    /// Lay out as `column`, `outlier_count`, `outlier_rows`.
    pub fn to_table(&self) -> Table {
        Table {
            columns: vec![
                Column::text("column", self.columns.iter().map(|c| c.column.as_str())),
                Column::integer(
                    "outlier_count",
                    self.columns.iter().map(|c| c.rows.len() as i64),
                ),
                Column::text(
                    "outlier_rows",
                    self.columns.iter().map(|c| {
                        c.rows
                            .iter()
                            .map(usize::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    }),
                ),
            ],
        }
    }
}

/// Find rows whose absolute z-score exceeds `z_cutoff`.
///
/// `columns` defaults to every numeric column. The z-score uses the
/// population standard deviation; a constant column has no outliers.
pub fn summarize_outliers(
    table: &Table,
    columns: Option<&[String]>,
    z_cutoff: f64,
) -> Result<OutlierSummary> {
    if !z_cutoff.is_finite() || z_cutoff <= 0.0 {
        return Err(Error::Validation(format!(
            "'z_cutoff' must be a positive number, got {}",
            z_cutoff
        )));
    }

    let selected: Vec<&Column> = match columns {
        Some(names) => names
            .iter()
            .map(|name| {
                let column = table.require_column(name)?;
                if !column.kind().is_numeric() {
                    return Err(Error::InvalidType(format!(
                        "Column '{}' is {}, outliers need a numeric column",
                        name,
                        column.kind()
                    )));
                }
                Ok(column)
            })
            .collect::<Result<_>>()?,
        None => table.numeric_columns().collect(),
    };

    let columns = selected
        .into_iter()
        .map(|column| ColumnOutliers {
            column: column.name.clone(),
            rows: outlier_rows(column, z_cutoff),
        })
        .collect();

    Ok(OutlierSummary { columns })
}

fn outlier_rows(column: &Column, z_cutoff: f64) -> Vec<usize> {
    let values = column.numeric_values().unwrap_or_default();
    if values.is_empty() {
        return Vec::new();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    if std == 0.0 {
        return Vec::new();
    }

    (0..column.len())
        .filter(|&i| {
            column
                .f64_at(i)
                .is_some_and(|v| ((v - mean) / std).abs() > z_cutoff)
        })
        .collect()
}
