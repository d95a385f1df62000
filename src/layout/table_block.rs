//! Table block rendering.

use super::flow::{ensure_fits, FlowState};
use super::surface::{DrawOp, Surface};
use super::text::{text_width, truncate_to_width, Font, PT_TO_MM};
use crate::model::{CellValue, Table};

/// Horizontal padding inside each cell, in millimetres.
const CELL_PADDING: f32 = 1.5;

/// Fill for the header row.
const HEADER_GRAY: f32 = 0.9;

/// Fill for every other body row.
const STRIPE_GRAY: f32 = 0.96;

/// What drawing a table did to the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLayout {
    /// Number of column groups the table was split into (0 for empty tables)
    pub column_groups: usize,
    /// Body rows drawn, summed over column groups
    pub rows_drawn: usize,
    /// Pages started while drawing
    pub page_breaks: usize,
}

/// Format a cell for display.
///
/// Floats use a fixed number of decimals, booleans read `True`/`False` and
/// missing values read `NaN`.
pub fn format_cell(value: &CellValue, precision: usize) -> String {
    match value {
        CellValue::Float(v) if !v.is_nan() => format!("{:.*}", precision, v),
        other => other.to_string(),
    }
}

/// Split `columns` into consecutive groups that each fit the page width.
pub fn column_groups(columns: usize, available_width: f32, min_column_width: f32) -> Vec<std::ops::Range<usize>> {
    if columns == 0 {
        return Vec::new();
    }
    let per_group = ((available_width / min_column_width).floor() as usize).max(1);
    (0..columns)
        .step_by(per_group)
        .map(|start| start..(start + per_group).min(columns))
        .collect()
}

/// Draw `table` at the cursor.
///
/// Each row is checked against the bottom margin before it is drawn; when a
/// new page is started the header row is repeated. Tables wider than the
/// page are drawn as several consecutive tables of adjacent columns. An
/// empty table draws nothing and leaves the cursor where it was.
pub fn render_table(surface: &mut Surface, table: &Table) -> TableLayout {
    let mut layout = TableLayout::default();
    if table.is_empty() {
        return layout;
    }

    let config = surface.config().clone();
    let groups = column_groups(
        table.column_count(),
        config.content_width(),
        config.min_column_width,
    );
    if groups.len() > 1 {
        log::debug!(
            "Splitting {} columns into {} groups",
            table.column_count(),
            groups.len()
        );
    }
    layout.column_groups = groups.len();

    for (index, group) in groups.into_iter().enumerate() {
        if index > 0 {
            surface.advance(config.block_spacing);
        }
        let col_width = config.content_width() / group.len() as f32;
        let cells = CellGrid {
            table,
            columns: group,
            col_width,
        };

        if ensure_fits(surface, 2.0 * config.row_height) == FlowState::PageFull {
            layout.page_breaks += 1;
        }
        cells.draw_header(surface);

        for row in 0..table.row_count() {
            if ensure_fits(surface, config.row_height) == FlowState::PageFull {
                layout.page_breaks += 1;
                cells.draw_header(surface);
            }
            cells.draw_row(surface, row);
            layout.rows_drawn += 1;
        }

        let y = surface.cursor_y();
        surface.push(DrawOp::Line {
            x1: config.margin_left,
            y1: y,
            x2: config.margin_left + cells.width(),
            y2: y,
            width: 0.3,
        });
    }

    layout
}

/// One column group of a table, laid out with equal column widths.
struct CellGrid<'a> {
    table: &'a Table,
    columns: std::ops::Range<usize>,
    col_width: f32,
}

impl CellGrid<'_> {
    fn width(&self) -> f32 {
        self.col_width * self.columns.len() as f32
    }

    fn baseline(&self, surface: &Surface) -> f32 {
        let config = surface.config();
        surface.cursor_y() + config.row_height * 0.5 + config.table_font_size * PT_TO_MM * 0.35
    }

    fn draw_header(&self, surface: &mut Surface) {
        let config = surface.config().clone();
        let top = surface.cursor_y();
        let baseline = self.baseline(surface);

        surface.push(DrawOp::FillRect {
            x: config.margin_left,
            y: top,
            width: self.width(),
            height: config.row_height,
            gray: HEADER_GRAY,
        });

        for (slot, column) in self.table.columns[self.columns.clone()].iter().enumerate() {
            let inner = self.col_width - 2.0 * CELL_PADDING;
            let name = truncate_to_width(&column.name, inner, config.table_font_size, Font::Bold);
            surface.push(DrawOp::Text {
                x: config.margin_left + slot as f32 * self.col_width + CELL_PADDING,
                y: baseline,
                size: config.table_font_size,
                font: Font::Bold,
                text: name.into_owned(),
            });
        }

        surface.push(DrawOp::Line {
            x1: config.margin_left,
            y1: top + config.row_height,
            x2: config.margin_left + self.width(),
            y2: top + config.row_height,
            width: 0.3,
        });
        surface.advance(config.row_height);
    }

    fn draw_row(&self, surface: &mut Surface, row: usize) {
        let config = surface.config().clone();
        let top = surface.cursor_y();
        let baseline = self.baseline(surface);

        if row % 2 == 1 {
            surface.push(DrawOp::FillRect {
                x: config.margin_left,
                y: top,
                width: self.width(),
                height: config.row_height,
                gray: STRIPE_GRAY,
            });
        }

        for (slot, column) in self.table.columns[self.columns.clone()].iter().enumerate() {
            let value = column.get(row).unwrap_or(CellValue::Null);
            let formatted = format_cell(&value, config.float_precision);
            let inner = self.col_width - 2.0 * CELL_PADDING;
            let text = truncate_to_width(&formatted, inner, config.table_font_size, Font::Regular);

            let left = config.margin_left + slot as f32 * self.col_width;
            let x = if value.as_f64().is_some() {
                left + self.col_width
                    - CELL_PADDING
                    - text_width(&text, config.table_font_size, Font::Regular)
            } else {
                left + CELL_PADDING
            };

            surface.push(DrawOp::Text {
                x,
                y: baseline,
                size: config.table_font_size,
                font: Font::Regular,
                text: text.into_owned(),
            });
        }

        surface.advance(config.row_height);
    }
}
