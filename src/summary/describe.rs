//! Descriptive statistics for numeric samples.

use crate::model::{Column, ColumnData, Table};
use serde::{Deserialize, Serialize};

/// Row labels of a describe table, in order.
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Count, moments and quantiles of a sample.
///
/// Everything except `count` is `None` for an empty sample; `std` is also
/// `None` for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator)
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl Describe {
    /// Values in [`STATISTICS`] order.
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Describe a sample. Missing values must already be removed.
pub fn describe(values: &[f64]) -> Describe {
    let count = values.len();
    if count == 0 {
        return Describe {
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            q50: None,
            q75: None,
            max: None,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    Describe {
        count,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Quantile of sorted values with linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Lay out described columns as a table: one `statistic` label column, then
/// one float column per described column.
pub fn describe_table(described: &[(String, Describe)]) -> Table {
    let mut columns = Vec::with_capacity(described.len() + 1);
    columns.push(Column::text("statistic", STATISTICS));
    for (name, stats) in described {
        columns.push(Column::new(
            name.clone(),
            ColumnData::Float(stats.values().to_vec()),
        ));
    }
    Table { columns }
}

/// Lay out one described sample as a single-row table with a column per
/// statistic, led by a `variable` column holding `name`.
pub fn describe_row(name: &str, stats: &Describe) -> Table {
    let mut columns = Vec::with_capacity(STATISTICS.len() + 1);
    columns.push(Column::text("variable", [name]));
    for (label, value) in STATISTICS.iter().zip(stats.values()) {
        columns.push(Column::new(*label, ColumnData::Float(vec![value])));
    }
    Table { columns }
}
