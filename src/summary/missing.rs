//! Missing value counts.

use crate::model::{Column, Table};

/// Summarize missing values per column.
///
/// Produces `column`, `missing_count` and `missing_percentage` (0 to 100)
/// columns with one row per input column.
pub fn summarize_missing_values(table: &Table) -> Table {
    let rows = table.row_count();
    let counts: Vec<usize> = table.columns.iter().map(Column::null_count).collect();
    let percentages = counts.iter().map(|&n| {
        if rows == 0 {
            0.0
        } else {
            n as f64 / rows as f64 * 100.0
        }
    });

    Table {
        columns: vec![
            Column::text("column", table.columns.iter().map(|c| c.name.as_str())),
            Column::integer("missing_count", counts.iter().map(|&n| n as i64)),
            Column::float("missing_percentage", percentages),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, ColumnData};

    #[test]
    fn test_missing_counts() {
        let table = Table::from_columns(vec![
            Column::new("a", ColumnData::Integer(vec![Some(1), None, None, Some(4)])),
            Column::text("b", ["w", "x", "y", "z"]),
        ])
        .unwrap();

        let result = summarize_missing_values(&table);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.row(0).unwrap()[1], CellValue::Integer(2));
        assert_eq!(result.row(0).unwrap()[2], CellValue::Float(50.0));
        assert_eq!(result.row(1).unwrap()[1], CellValue::Integer(0));
    }

    #[test]
    fn test_no_rows() {
        let table = Table::empty_with_columns(&["a"]);
        let result = summarize_missing_values(&table);
        assert_eq!(result.row(0).unwrap()[2], CellValue::Float(0.0));
    }
}
