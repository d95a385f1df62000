//! Categorical column summary.

use crate::error::{Error, Result};
use crate::model::{Column, Table};
use crate::warning::Warning;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default number of distinct categories above which a column is flagged.
pub const DEFAULT_MAX_CATEGORIES: usize = 10;

/// Frequencies of the categories in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Column name
    pub column: String,
    /// `(category, count)` pairs, most frequent first, ties by name
    pub categories: Vec<(String, usize)>,
}

/// Result of summarizing categorical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// `column`, `unique_categories`, `most_frequent`, `frequency`
    pub table: Table,
    /// Per-column category frequencies, in column order
    pub counts: Vec<CategoryCounts>,
    /// One warning per column with too many categories
    pub warnings: Vec<Warning>,
}

impl CategoricalSummary {
    /// Check if no categorical column was found.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count categories in every text and boolean column.
///
/// Missing values are not counted as a category. Columns with more than
/// `max_categories` distinct values produce a warning.
pub fn summarize_categorical(table: &Table, max_categories: usize) -> Result<CategoricalSummary> {
    if max_categories == 0 {
        return Err(Error::Validation(
            "'max_categories' must be at least 1".to_string(),
        ));
    }

    let counts: Vec<CategoryCounts> = table.categorical_columns().map(count_categories).collect();

    let warnings = counts
        .iter()
        .filter(|c| c.categories.len() > max_categories)
        .map(|c| {
            Warning::new(
                c.column.clone(),
                format!(
                    "Column '{}' has {} unique categories (more than {}); it may be too granular for meaningful analysis.",
                    c.column,
                    c.categories.len(),
                    max_categories
                ),
            )
        })
        .collect();

    let table = Table {
        columns: vec![
            Column::text("column", counts.iter().map(|c| c.column.as_str())),
            Column::integer(
                "unique_categories",
                counts.iter().map(|c| c.categories.len() as i64),
            ),
            Column::from_cells(
                "most_frequent",
                counts
                    .iter()
                    .map(|c| c.categories.first().map(|(name, _)| name.clone()).into())
                    .collect(),
            ),
            Column::from_cells(
                "frequency",
                counts
                    .iter()
                    .map(|c| c.categories.first().map(|(_, n)| *n as i64).into())
                    .collect(),
            ),
        ],
    };

    Ok(CategoricalSummary {
        table,
        counts,
        warnings,
    })
}

fn count_categories(column: &Column) -> CategoryCounts {
    let mut tally: HashMap<String, usize> = HashMap::new();
    for value in column.values().filter(|v| !v.is_null()) {
        *tally.entry(value.to_string()).or_default() += 1;
    }

    let mut categories: Vec<(String, usize)> = tally.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    CategoryCounts {
        column: column.name.clone(),
        categories,
    }
}
