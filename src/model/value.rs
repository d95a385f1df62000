//! Scalar cell values and column kinds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Text value
    Text(String),
}

impl CellValue {
    /// Check if the cell is missing.
    ///
    /// Float NaN counts as missing, the same way it would in the source data.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// The kind of the cell, or `None` for nulls.
    pub fn kind(&self) -> Option<ColumnKind> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(_) => Some(ColumnKind::Integer),
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(_) => Some(ColumnKind::Float),
            CellValue::Boolean(_) => Some(ColumnKind::Boolean),
            CellValue::Text(_) => Some(ColumnKind::Text),
        }
    }

    /// Total ordering used when sorting class labels.
    ///
    /// Nulls sort first, then numbers by value, then booleans, then text.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        fn rank(v: &CellValue) -> u8 {
            match v {
                CellValue::Null => 0,
                CellValue::Integer(_) | CellValue::Float(_) => 1,
                CellValue::Boolean(_) => 2,
                CellValue::Text(_) => 3,
            }
        }

        match (self, other) {
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => rank(self).cmp(&rank(other)),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NaN"),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Boolean(true) => write!(f, "True"),
            CellValue::Boolean(false) => write!(f, "False"),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Boolean(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// The uniform kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// 64-bit integers
    Integer,
    /// 64-bit floats
    Float,
    /// Booleans
    Boolean,
    /// Free text (also the kind of all-null columns)
    Text,
}

impl ColumnKind {
    /// Data type name as reported in the dtypes summary.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Boolean => "bool",
            ColumnKind::Text => "object",
        }
    }

    /// Check if the kind takes part in numeric summaries.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Check if the kind takes part in categorical summaries.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Boolean | ColumnKind::Text)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_detection() {
        assert!(CellValue::Null.is_null());
        assert!(CellValue::Float(f64::NAN).is_null());
        assert!(!CellValue::Integer(0).is_null());
        assert!(!CellValue::Text(String::new()).is_null());
    }

    #[test]
    fn test_display_booleans() {
        assert_eq!(CellValue::Boolean(true).to_string(), "True");
        assert_eq!(CellValue::Boolean(false).to_string(), "False");
        assert_eq!(CellValue::Null.to_string(), "NaN");
    }

    #[test]
    fn test_sort_cmp_mixed_numbers() {
        let a = CellValue::Integer(2);
        let b = CellValue::Float(1.5);
        assert_eq!(a.sort_cmp(&b), Ordering::Greater);

        let x = CellValue::from("x");
        let y = CellValue::from("y");
        assert_eq!(x.sort_cmp(&y), Ordering::Less);
    }

    #[test]
    fn test_dtype_names() {
        assert_eq!(ColumnKind::Integer.dtype_name(), "int64");
        assert_eq!(ColumnKind::Text.dtype_name(), "object");
        assert!(ColumnKind::Float.is_numeric());
        assert!(ColumnKind::Boolean.is_categorical());
    }
}
