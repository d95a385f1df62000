//! PNG charts placed in reports.
//!
//! Charts are plain rasters drawn with the `image` crate. They carry no text;
//! the report puts a header above each one. Every chart is written under the
//! renderer's directory, which is created on first use.

mod canvas;

pub use canvas::{Canvas, Rect};

use crate::error::Result;
use crate::model::{ColumnKind, Table};
use crate::summary::{CategoryCounts, CorrelationMatrix, TargetSummary, TargetType};
use canvas::{ACCENT, AXIS, BAR, MUTED};
use image::Rgb;
use std::fs;
use std::path::{Path, PathBuf};

const PANEL_WIDTH: u32 = 320;
const PANEL_HEIGHT: u32 = 220;
const PANELS_PER_ROW: u32 = 3;
const PANEL_MARGIN: u32 = 16;
const HEATMAP_CELL: u32 = 48;
/// Upper bound on the heatmap's side in pixels.
const HEATMAP_MAX_SIDE: u32 = 2048;

/// Writes chart images into one directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    dir: PathBuf,
    bins: usize,
}

impl ChartRenderer {
    /// Create a renderer writing into `dir`, with `bins` histogram bins.
    pub fn new(dir: impl Into<PathBuf>, bins: usize) -> Self {
        Self {
            dir: dir.into(),
            bins: bins.max(1),
        }
    }

    /// Directory charts are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One histogram panel per numeric column.
    ///
    /// Returns `None` when the table has fewer than two rows or no numeric
    /// column with values.
    pub fn numeric_plot(&self, table: &Table) -> Result<Option<PathBuf>> {
        if table.row_count() < 2 {
            return Ok(None);
        }
        let series: Vec<Vec<f64>> = table
            .numeric_columns()
            .filter_map(|c| c.numeric_values())
            .filter(|v| !v.is_empty())
            .collect();
        if series.is_empty() {
            return Ok(None);
        }

        let (mut canvas, panels) = panel_grid(series.len());
        for (values, panel) in series.iter().zip(panels) {
            let counts = histogram(values, self.bins);
            let max = counts.iter().copied().max().unwrap_or(0) as f64;
            let heights: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
            canvas.bars(panel, &heights, max, BAR);
        }
        self.save(&canvas, "numeric_plot.png").map(Some)
    }

    /// Correlation heatmap, blue for -1 through white to red for +1.
    pub fn corr_plot(&self, matrix: &CorrelationMatrix) -> Result<Option<PathBuf>> {
        let n = matrix.columns.len() as u32;
        if n == 0 {
            return Ok(None);
        }

        let (cell, n) = heatmap_cells(n);
        let gap = u32::from(cell > 4);
        let side = n * cell + 2 * PANEL_MARGIN;
        let mut canvas = Canvas::new(side, side);
        for i in 0..n {
            for j in 0..n {
                let value = matrix.get(i as usize, j as usize).unwrap_or(f64::NAN);
                let rect = Rect::new(
                    PANEL_MARGIN + j * cell,
                    PANEL_MARGIN + i * cell,
                    cell - gap,
                    cell - gap,
                );
                canvas.fill(rect, correlation_color(value));
            }
        }
        self.save(&canvas, "corr_plot.png").map(Some)
    }

    /// Class proportions with the balanced band, or a histogram of a
    /// numerical target.
    pub fn target_plot(&self, summary: &TargetSummary, data: &Table) -> Result<Option<PathBuf>> {
        let mut canvas = Canvas::new(PANEL_WIDTH * 2, PANEL_HEIGHT * 2);
        let area = canvas.bounds().inset(PANEL_MARGIN * 2);

        match summary.target_type {
            TargetType::Categorical => {
                let Some(proportions) = summary
                    .table
                    .column("proportion")
                    .and_then(|c| c.numeric_values())
                    .filter(|p| !p.is_empty())
                else {
                    return Ok(None);
                };
                let threshold = summary
                    .table
                    .column("threshold")
                    .and_then(|c| c.f64_at(0))
                    .unwrap_or(0.0);

                let expected = 1.0 / proportions.len() as f64;
                let lower = expected * (1.0 - threshold);
                let upper = expected * (1.0 + threshold);
                let max = proportions.iter().copied().fold(upper, f64::max) * 1.1;

                canvas.bars(area, &proportions, max, BAR);
                for bound in [lower, upper] {
                    let offset = (bound / max * area.height as f64).round() as u32;
                    canvas.hline(area.x, area.bottom().saturating_sub(offset), area.width, ACCENT);
                }
            }
            TargetType::Numerical => {
                let Some(values) = data
                    .column(&summary.target)
                    .and_then(|c| c.numeric_values())
                    .filter(|v| !v.is_empty())
                else {
                    return Ok(None);
                };
                let counts = histogram(&values, self.bins);
                let max = counts.iter().copied().max().unwrap_or(0) as f64;
                let heights: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
                canvas.bars(area, &heights, max, BAR);
            }
        }
        self.save(&canvas, "target_plot.png").map(Some)
    }

    /// Missing percentage per column, on a 0 to 100 scale.
    pub fn missing_plot(&self, missing: &Table) -> Result<Option<PathBuf>> {
        let Some(percentages) = missing
            .column("missing_percentage")
            .and_then(|c| c.numeric_values())
            .filter(|p| !p.is_empty())
        else {
            return Ok(None);
        };
        self.bar_chart(&percentages, 100.0, "missing_plot.png")
    }

    /// Column count per data type.
    pub fn dtypes_plot(&self, counts: &[(ColumnKind, usize)]) -> Result<Option<PathBuf>> {
        let values: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
        let max = values.iter().copied().fold(0.0, f64::max);
        self.bar_chart(&values, max, "dtypes_plot.png")
    }

    /// One panel of category frequencies per column, at most
    /// `max_categories` bars each; further categories are grouped in a
    /// muted trailing bar.
    pub fn categorical_plot(
        &self,
        counts: &[CategoryCounts],
        max_categories: usize,
    ) -> Result<Option<PathBuf>> {
        let counts: Vec<&CategoryCounts> =
            counts.iter().filter(|c| !c.categories.is_empty()).collect();
        if counts.is_empty() {
            return Ok(None);
        }

        let (mut canvas, panels) = panel_grid(counts.len());
        for (column, panel) in counts.iter().zip(panels) {
            let shown = column.categories.len().min(max_categories.max(1));
            let mut heights: Vec<f64> = column.categories[..shown]
                .iter()
                .map(|(_, n)| *n as f64)
                .collect();
            let rest: usize = column.categories[shown..].iter().map(|(_, n)| n).sum();
            let max = heights.iter().copied().fold(rest as f64, f64::max);

            if rest > 0 {
                heights.push(rest as f64);
            }
            canvas.bars_with(panel, &heights, max, |i| if i < shown { BAR } else { MUTED });
        }
        self.save(&canvas, "categorical_plot.png").map(Some)
    }

    fn bar_chart(&self, values: &[f64], max: f64, file_name: &str) -> Result<Option<PathBuf>> {
        if values.is_empty() {
            return Ok(None);
        }
        let mut canvas = Canvas::new(PANEL_WIDTH * 2, PANEL_HEIGHT + 2 * PANEL_MARGIN);
        let area = canvas.bounds().inset(PANEL_MARGIN);
        canvas.bars(area, values, max, BAR);
        self.save(&canvas, file_name).map(Some)
    }

    fn save(&self, canvas: &Canvas, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        canvas.save(&path)?;
        log::debug!(
            "Wrote {}x{} chart to {}",
            canvas.width(),
            canvas.height(),
            path.display()
        );
        Ok(path)
    }
}

/// Count `values` into `bins` equal-width bins spanning their range.
///
/// A constant series lands entirely in the first bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<usize> {
    let bins = bins.max(1);
    let mut counts = vec![0; bins];
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return counts;
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    for v in finite {
        let index = if width > 0.0 {
            (((v - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1;
    }
    counts
}

/// Cell size and drawn column count for an `n` by `n` heatmap.
///
/// Cells shrink so the image stays within `HEATMAP_MAX_SIDE`; past one pixel
/// per cell only the leading columns are drawn.
fn heatmap_cells(n: u32) -> (u32, u32) {
    let room = HEATMAP_MAX_SIDE - 2 * PANEL_MARGIN;
    let cell = (room / n.max(1)).clamp(1, HEATMAP_CELL);
    let drawn = n.min(room / cell);
    if drawn < n {
        log::warn!(
            "Correlation heatmap limited to the first {} of {} columns",
            drawn,
            n
        );
    }
    (cell, drawn)
}

/// Heatmap colour for a correlation coefficient.
pub fn correlation_color(value: f64) -> Rgb<u8> {
    if !value.is_finite() {
        return MUTED;
    }
    let v = value.clamp(-1.0, 1.0);
    let fade = |t: f64| (255.0 * (1.0 - t)).round() as u8;
    if v < 0.0 {
        Rgb([fade(-v), fade(-v), 255])
    } else {
        Rgb([255, fade(v), fade(v)])
    }
}

fn panel_grid(count: usize) -> (Canvas, Vec<Rect>) {
    let count = count.max(1) as u32;
    let per_row = count.min(PANELS_PER_ROW);
    let rows = count.div_ceil(PANELS_PER_ROW);

    let mut canvas = Canvas::new(per_row * PANEL_WIDTH, rows * PANEL_HEIGHT);
    let panels: Vec<Rect> = (0..count)
        .map(|i| {
            Rect::new(
                (i % PANELS_PER_ROW) * PANEL_WIDTH,
                (i / PANELS_PER_ROW) * PANEL_HEIGHT,
                PANEL_WIDTH,
                PANEL_HEIGHT,
            )
            .inset(PANEL_MARGIN)
        })
        .collect();

    for i in 1..per_row {
        canvas.vline(i * PANEL_WIDTH, 0, canvas.height(), AXIS);
    }
    (canvas, panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::summary::{summarize_categorical, summarize_numeric, summarize_target, NumericSummary};

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::float("height", [1.6, 1.7, 1.8, 1.9, 2.0]),
            Column::integer("age", [20, 30, 40, 50, 60]),
            Column::text("team", ["a", "b", "a", "c", "a"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_histogram() {
        assert_eq!(histogram(&[0.0, 1.0, 2.0, 3.0], 2), vec![2, 2]);
        assert_eq!(histogram(&[5.0, 5.0], 3), vec![2, 0, 0]);
        assert_eq!(histogram(&[], 4), vec![0; 4]);
        assert_eq!(histogram(&[1.0, f64::NAN, 2.0], 1), vec![2]);
    }

    #[test]
    fn test_correlation_color() {
        assert_eq!(correlation_color(1.0), Rgb([255, 0, 0]));
        assert_eq!(correlation_color(-1.0), Rgb([0, 0, 255]));
        assert_eq!(correlation_color(0.0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_numeric_and_corr_plots() {
        let dir = tempfile::tempdir().unwrap();
        let charts = ChartRenderer::new(dir.path().join("img"), 10);
        let table = sample();

        let path = charts.numeric_plot(&table).unwrap().unwrap();
        assert!(path.ends_with("img/numeric_plot.png"));
        let image = image::open(&path).unwrap();
        assert_eq!(image.width(), 2 * PANEL_WIDTH);

        let NumericSummary::Summary { correlation, .. } = summarize_numeric(&table) else {
            panic!("expected numeric summary");
        };
        let path = charts.corr_plot(&correlation.unwrap()).unwrap().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_heatmap_size_is_bounded() {
        assert_eq!(heatmap_cells(3), (HEATMAP_CELL, 3));
        assert_eq!(heatmap_cells(5000), (1, HEATMAP_MAX_SIDE - 2 * PANEL_MARGIN));

        let dir = tempfile::tempdir().unwrap();
        let charts = ChartRenderer::new(dir.path(), 10);
        let n = 300;
        let matrix = CorrelationMatrix {
            columns: (0..n).map(|i| format!("c{}", i)).collect(),
            values: (0..n)
                .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
                .collect(),
        };
        let path = charts.corr_plot(&matrix).unwrap().unwrap();
        let image = image::open(&path).unwrap();
        assert!(image.width() <= HEATMAP_MAX_SIDE);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_single_row_has_no_numeric_plot() {
        let dir = tempfile::tempdir().unwrap();
        let charts = ChartRenderer::new(dir.path().join("img"), 10);
        let table = sample().head(1);
        assert!(charts.numeric_plot(&table).unwrap().is_none());
        assert!(!charts.dir().exists());
    }

    #[test]
    fn test_target_and_categorical_plots() {
        let dir = tempfile::tempdir().unwrap();
        let charts = ChartRenderer::new(dir.path(), 10);
        let table = sample();

        let summary = summarize_target(&table, "team", TargetType::Categorical, None).unwrap();
        assert!(charts.target_plot(&summary, &table).unwrap().is_some());

        let summary = summarize_target(&table, "height", TargetType::Numerical, None).unwrap();
        assert!(charts.target_plot(&summary, &table).unwrap().is_some());

        let categorical = summarize_categorical(&table, 2).unwrap();
        let path = charts.categorical_plot(&categorical.counts, 2).unwrap().unwrap();
        assert!(path.ends_with("categorical_plot.png"));
    }
}
