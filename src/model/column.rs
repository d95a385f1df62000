//! Named, uniformly typed columns.

use super::{CellValue, ColumnKind};
use serde::{Deserialize, Serialize};

/// Cell storage for a column. Every cell has the column's kind or is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    /// Integer cells
    Integer(Vec<Option<i64>>),
    /// Float cells
    Float(Vec<Option<f64>>),
    /// Boolean cells
    Boolean(Vec<Option<bool>>),
    /// Text cells
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }
}

/// A named column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Column cells
    pub data: ColumnData,
}

impl Column {
    /// Create a column from existing storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create an integer column without missing values.
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ColumnData::Integer(values.into_iter().map(Some).collect()),
        )
    }

    /// Create a float column without missing values.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ColumnData::Float(values.into_iter().map(Some).collect()),
        )
    }

    /// Create a boolean column without missing values.
    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::new(
            name,
            ColumnData::Boolean(values.into_iter().map(Some).collect()),
        )
    }

    /// Create a text column without missing values.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|s| Some(s.into())).collect()),
        )
    }

    /// Build a column from loosely typed cells, inferring a single kind.
    ///
    /// Integers mixed with floats widen to float. Any other mix, and a column
    /// with no values at all, becomes text.
    pub fn from_cells(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        let mut kind: Option<ColumnKind> = None;
        let mut mixed = false;

        for cell in &cells {
            let Some(cell_kind) = cell.kind() else {
                continue;
            };
            kind = match (kind, cell_kind) {
                (None, k) => Some(k),
                (Some(a), b) if a == b => Some(a),
                (Some(ColumnKind::Integer), ColumnKind::Float)
                | (Some(ColumnKind::Float), ColumnKind::Integer) => Some(ColumnKind::Float),
                (Some(_), _) => {
                    mixed = true;
                    break;
                }
            };
        }

        let kind = if mixed {
            ColumnKind::Text
        } else {
            kind.unwrap_or(ColumnKind::Text)
        };

        let data = match kind {
            ColumnKind::Integer => ColumnData::Integer(
                cells
                    .iter()
                    .map(|c| match c {
                        CellValue::Integer(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            ),
            ColumnKind::Float => ColumnData::Float(cells.iter().map(CellValue::as_f64).collect()),
            ColumnKind::Boolean => ColumnData::Boolean(
                cells
                    .iter()
                    .map(|c| match c {
                        CellValue::Boolean(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            ),
            ColumnKind::Text => ColumnData::Text(
                cells
                    .iter()
                    .map(|c| if c.is_null() { None } else { Some(c.to_string()) })
                    .collect(),
            ),
        };

        Self::new(name, data)
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the column kind.
    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Integer(_) => ColumnKind::Integer,
            ColumnData::Float(_) => ColumnKind::Float,
            ColumnData::Boolean(_) => ColumnKind::Boolean,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    /// Get a cell by row index.
    pub fn get(&self, row: usize) -> Option<CellValue> {
        if row >= self.len() {
            return None;
        }
        let value = match &self.data {
            ColumnData::Integer(v) => v[row].into(),
            ColumnData::Float(v) => v[row].into(),
            ColumnData::Boolean(v) => v[row].into(),
            ColumnData::Text(v) => v[row].clone().into(),
        };
        Some(value)
    }

    /// Iterate over all cells.
    pub fn values(&self) -> impl Iterator<Item = CellValue> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Check if a cell is missing.
    pub fn is_null(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).map_or(true, Option::is_none),
            ColumnData::Float(v) => v.get(row).map_or(true, |c| c.map_or(true, f64::is_nan)),
            ColumnData::Boolean(v) => v.get(row).map_or(true, Option::is_none),
            ColumnData::Text(v) => v.get(row).map_or(true, Option::is_none),
        }
    }

    /// Count missing cells.
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Numeric value of a cell (numeric columns only).
    pub fn f64_at(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).copied().flatten().map(|x| x as f64),
            ColumnData::Float(v) => v.get(row).copied().flatten().filter(|x| !x.is_nan()),
            _ => None,
        }
    }

    /// Non-missing numeric values in row order, or `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        if !self.kind().is_numeric() {
            return None;
        }
        Some((0..self.len()).filter_map(|i| self.f64_at(i)).collect())
    }

    /// Build a new column from the given row indices.
    pub fn select(&self, rows: &[usize]) -> Column {
        fn pick<T: Clone>(v: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
            rows.iter()
                .map(|&i| v.get(i).cloned().flatten())
                .collect()
        }

        let data = match &self.data {
            ColumnData::Integer(v) => ColumnData::Integer(pick(v, rows)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, rows)),
            ColumnData::Boolean(v) => ColumnData::Boolean(pick(v, rows)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, rows)),
        };
        Column::new(self.name.clone(), data)
    }
}
