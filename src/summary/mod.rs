//! Dataset summaries.
//!
//! Each summary takes a [`Table`](crate::model::Table) and returns a small
//! typed result, usually including a table ready to be placed in a report.

mod categorical;
mod describe;
mod dtypes;
mod json;
mod missing;
mod numeric;
mod outliers;
mod target;

pub use categorical::{
    summarize_categorical, CategoricalSummary, CategoryCounts, DEFAULT_MAX_CATEGORIES,
};
pub use describe::{describe, describe_row, describe_table, quantile, Describe, STATISTICS};
pub use dtypes::{dtype_counts, summarize_dtypes};
pub use json::{to_json, JsonFormat};
pub use missing::summarize_missing_values;
pub use numeric::{
    correlation_matrix, summarize_numeric, CorrelationMatrix, NumericSummary, NO_NUMERIC_COLUMNS,
};
pub use outliers::{summarize_outliers, ColumnOutliers, OutlierSummary, DEFAULT_Z_CUTOFF};
pub use target::{
    summarize_target, TargetSummary, TargetType, CATEGORICAL_COLUMNS, DEFAULT_IMBALANCE_THRESHOLD,
};
