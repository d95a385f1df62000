//! Target variable summary: class balance or distribution.

use super::describe::{describe, describe_row};
use crate::error::{Error, Result};
use crate::model::{CellValue, Column, ColumnKind, Table};
use crate::warning::Warning;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default relative tolerance around the balanced class proportion.
pub const DEFAULT_IMBALANCE_THRESHOLD: f64 = 0.2;

/// Column names of a categorical target summary.
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["class", "proportion", "imbalanced", "threshold"];

/// How a target variable is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Classes, checked for balance
    Categorical,
    /// Continuous values, described
    Numerical,
}

impl TargetType {
    /// Guess the target type from a column's kind.
    pub fn infer(kind: ColumnKind) -> Self {
        if kind == ColumnKind::Float {
            TargetType::Numerical
        } else {
            TargetType::Categorical
        }
    }
}

impl FromStr for TargetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "categorical" => Ok(TargetType::Categorical),
            "numerical" => Ok(TargetType::Numerical),
            _ => Err(Error::Validation(
                "Invalid target_type. Must be 'categorical' or 'numerical'.".to_string(),
            )),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Categorical => write!(f, "categorical"),
            TargetType::Numerical => write!(f, "numerical"),
        }
    }
}

/// Result of summarizing a target variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target column name
    pub target: String,
    /// Interpretation used
    pub target_type: TargetType,
    /// Class balance table (categorical) or one-row describe table (numerical)
    pub table: Table,
    /// Non-fatal findings
    pub warnings: Vec<Warning>,
}

/// Summarize the `target` column.
///
/// For a categorical target each class gets its share of the non-missing
/// values, and is flagged as imbalanced when that share falls outside
/// `[(1 - t) / n, (1 + t) / n]` for `n` classes and threshold `t`
/// (default 0.2). For a numerical target the threshold is not used; passing
/// one yields a warning.
pub fn summarize_target(
    table: &Table,
    target: &str,
    target_type: TargetType,
    threshold: Option<f64>,
) -> Result<TargetSummary> {
    let column = table.require_column(target)?;

    let (table, warnings) = match target_type {
        TargetType::Categorical => {
            let threshold = threshold.unwrap_or(DEFAULT_IMBALANCE_THRESHOLD);
            if !(0.0..=1.0).contains(&threshold) {
                return Err(Error::Validation(
                    "Threshold must be between 0 and 1.".to_string(),
                ));
            }
            (class_balance(column, threshold), Vec::new())
        }
        TargetType::Numerical => numerical_summary(column, threshold)?,
    };

    Ok(TargetSummary {
        target: target.to_string(),
        target_type,
        table,
        warnings,
    })
}

fn class_balance(column: &Column, threshold: f64) -> Table {
    let mut classes: Vec<(CellValue, usize)> = Vec::new();
    for value in column.values().filter(|v| !v.is_null()) {
        match classes.iter_mut().find(|(c, _)| *c == value) {
            Some((_, n)) => *n += 1,
            None => classes.push((value, 1)),
        }
    }

    if classes.is_empty() {
        return Table::empty_with_columns(&CATEGORICAL_COLUMNS);
    }
    classes.sort_by(|a, b| a.0.sort_cmp(&b.0));

    let total: usize = classes.iter().map(|(_, n)| n).sum();
    let expected = 1.0 / classes.len() as f64;
    let lower = expected * (1.0 - threshold);
    let upper = expected * (1.0 + threshold);

    let proportions: Vec<f64> = classes
        .iter()
        .map(|(_, n)| *n as f64 / total as f64)
        .collect();

    Table {
        columns: vec![
            Column::from_cells("class", classes.into_iter().map(|(c, _)| c).collect()),
            Column::float("proportion", proportions.iter().copied()),
            Column::boolean(
                "imbalanced",
                proportions.iter().map(|&p| p < lower || p > upper),
            ),
            Column::float("threshold", std::iter::repeat(threshold).take(proportions.len())),
        ],
    }
}

fn numerical_summary(column: &Column, threshold: Option<f64>) -> Result<(Table, Vec<Warning>)> {
    let values = column.numeric_values().ok_or_else(|| {
        Error::InvalidType(format!(
            "Column '{}' is {}, a numerical target needs a numeric column",
            column.name,
            column.kind()
        ))
    })?;

    if column.is_empty() {
        return Ok((Table::new(), Vec::new()));
    }

    let mut warnings = Vec::new();
    if threshold.is_some() {
        warnings.push(Warning::new(
            column.name.clone(),
            "Threshold is not used for numerical targets.",
        ));
    }

    Ok((describe_row(&column.name, &describe(&values)), warnings))
}
