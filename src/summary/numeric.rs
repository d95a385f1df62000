//! Numeric column summary and correlation.

use super::describe::{describe, describe_table, Describe};
use crate::model::{Column, ColumnData, Table};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Caption shown when a dataset has nothing to summarize numerically.
pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns found in the dataset.";

/// Pearson correlation between numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Column names, for both axes
    pub columns: Vec<String>,
    /// Row-major coefficients; `NaN` where undefined
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between columns `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Lay out as a table with a leading `column` label column.
    pub fn to_table(&self) -> Table {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::text("column", self.columns.iter().map(String::as_str)));
        for (j, name) in self.columns.iter().enumerate() {
            let cells = self
                .values
                .iter()
                .map(|row| row.get(j).copied().filter(|v| !v.is_nan()))
                .collect();
            columns.push(Column::new(name.clone(), ColumnData::Float(cells)));
        }
        Table { columns }
    }
}

/// Result of summarizing numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NumericSummary {
    /// No numeric column has any values
    NoNumericColumns,
    /// Statistics for the numeric columns
    Summary {
        /// `statistic` label column plus one column per numeric column
        describe: Table,
        /// Present with at least two numeric columns and two rows
        correlation: Option<CorrelationMatrix>,
    },
}

impl NumericSummary {
    /// Check if there was anything to summarize.
    pub fn is_empty(&self) -> bool {
        matches!(self, NumericSummary::NoNumericColumns)
    }
}

/// Summarize numeric columns.
///
/// Columns whose cells are all missing are skipped. Statistics are computed
/// per column in parallel; results keep column order.
pub fn summarize_numeric(table: &Table) -> NumericSummary {
    let numeric: Vec<&Column> = table
        .numeric_columns()
        .filter(|c| c.null_count() < c.len())
        .collect();

    if numeric.is_empty() {
        log::debug!("{}", NO_NUMERIC_COLUMNS);
        return NumericSummary::NoNumericColumns;
    }

    let described: Vec<(String, Describe)> = numeric
        .par_iter()
        .map(|c| {
            let values = c.numeric_values().unwrap_or_default();
            (c.name.clone(), describe(&values))
        })
        .collect();

    let correlation = (numeric.len() >= 2 && table.row_count() >= 2)
        .then(|| correlation_matrix(&numeric));

    NumericSummary::Summary {
        describe: describe_table(&described),
        correlation,
    }
}

/// Pairwise-complete Pearson correlation between the given numeric columns.
pub fn correlation_matrix(columns: &[&Column]) -> CorrelationMatrix {
    let n = columns.len();
    let values: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| pearson(columns[i], columns[j]))
                .collect()
        })
        .collect();

    CorrelationMatrix {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        values,
    }
}

fn pearson(a: &Column, b: &Column) -> f64 {
    let pairs: Vec<(f64, f64)> = (0..a.len().min(b.len()))
        .filter_map(|i| Some((a.f64_at(i)?, b.f64_at(i)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}
