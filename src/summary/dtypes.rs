//! Data type counts.

use crate::model::{Column, ColumnKind, Table};

/// Count columns per kind, in order of first occurrence.
pub fn dtype_counts(table: &Table) -> Vec<(ColumnKind, usize)> {
    let mut counts: Vec<(ColumnKind, usize)> = Vec::new();
    for column in &table.columns {
        let kind = column.kind();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts
}

/// Summarize column data types as a `DataType` / `Count` table.
///
/// A table without columns yields an empty result that still has both
/// columns.
pub fn summarize_dtypes(table: &Table) -> Table {
    let counts = dtype_counts(table);
    Table {
        columns: vec![
            Column::text("DataType", counts.iter().map(|(k, _)| k.dtype_name())),
            Column::integer("Count", counts.iter().map(|(_, n)| *n as i64)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_mixed_dtypes() {
        let table = Table::from_columns(vec![
            Column::integer("int_col", [1, 2, 3]),
            Column::float("float_col", [1.1, 2.2, 3.3]),
            Column::text("str_col", ["a", "b", "c"]),
            Column::boolean("bool_col", [true, false, true]),
        ])
        .unwrap();

        let result = summarize_dtypes(&table);
        let names: Vec<CellValue> = result.columns[0].values().collect();
        assert_eq!(
            names,
            vec![
                CellValue::from("int64"),
                CellValue::from("float64"),
                CellValue::from("object"),
                CellValue::from("bool"),
            ]
        );
        assert!(result.columns[1].values().all(|v| v == CellValue::Integer(1)));
    }

    #[test]
    fn test_empty_table() {
        let result = summarize_dtypes(&Table::new());
        assert_eq!(result.column_names(), vec!["DataType", "Count"]);
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn test_repeated_kinds() {
        let table = Table::from_columns(vec![
            Column::float("a", [1.0]),
            Column::text("b", ["x"]),
            Column::float("c", [2.0]),
        ])
        .unwrap();
        assert_eq!(
            dtype_counts(&table),
            vec![(ColumnKind::Float, 2), (ColumnKind::Text, 1)]
        );
    }
}
