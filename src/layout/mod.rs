//! Report layout and pagination.
//!
//! The layout engine places a sequence of [`Block`](crate::model::Block)s on
//! fixed-size pages. A [`ReportBuilder`] owns the [`Surface`] and the cursor,
//! asks the page-flow functions whether a block fits before each placement,
//! and writes the finished document once through the PDF writer.

mod builder;
mod config;
pub mod flow;
mod image_block;
mod path;
mod surface;
mod table_block;
pub mod text;
mod writer;

pub use builder::{BuildPhase, BuildStats, FinishedReport, Placement, ReportBuilder};
pub use config::{validate_padding, validate_page_dimensions, LayoutConfig};
pub use flow::{ensure_fits, ensure_room, FlowState};
pub use image_block::{fit_image, render_image, RenderedExtent};
pub use path::{resolve_path, OutputTarget, PathKind, ValidatedPath};
pub use surface::{DrawOp, ImageResource, PageContent, Surface};
pub use table_block::{column_groups, format_cell, render_table, TableLayout};
pub use writer::{write_pdf, DocumentInfo};
