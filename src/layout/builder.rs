//! Report assembly: the build state machine around a [`Surface`].

use super::flow::ensure_room;
use super::image_block::{render_image, RenderedExtent};
use super::path::{resolve_path, OutputTarget, PathKind, ValidatedPath};
use super::surface::{DrawOp, Surface};
use super::table_block::{render_table, TableLayout};
use super::text::{truncate_to_width, Font, PT_TO_MM};
use super::writer::{write_pdf, DocumentInfo};
use super::LayoutConfig;
use crate::error::{Error, Result};
use crate::model::{Block, HeaderLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.6;

/// Gap between a section header's rule and the next block.
const RULE_GAP: f32 = 2.0;

/// Public view of the builder's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildPhase {
    /// Created; no output target yet
    Initial,
    /// Accepting blocks
    Building,
    /// The document was written, or the build was aborted
    Finalized,
}

/// Counters collected while blocks are appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Header blocks drawn
    pub headers: usize,
    /// Non-empty tables drawn
    pub tables: usize,
    /// Tables skipped because they had no rows or columns
    pub empty_tables: usize,
    /// Images placed
    pub images: usize,
    /// Table body rows drawn
    pub table_rows: usize,
}

/// Where an appended block ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A header line was drawn
    Header,
    /// A table was drawn (or skipped when empty)
    Table(TableLayout),
    /// An image was placed with this extent
    Image(RenderedExtent),
}

/// Result of a successful [`ReportBuilder::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedReport {
    /// Path of the written PDF
    pub path: PathBuf,
    /// Pages in the document
    pub page_count: usize,
    /// Size of the written file
    pub bytes_written: usize,
    /// Block counters
    pub stats: BuildStats,
}

struct Session {
    target: ValidatedPath,
    surface: Surface,
}

enum State {
    Initial,
    Building(Session),
    Finalized,
}

/// Assembles blocks into a paginated PDF.
///
/// The builder moves through `Initial -> Building -> Finalized` exactly once.
/// Nothing is written to disk until [`finish`](Self::finish) succeeds.
///
/// # Example
///
/// ```no_run
/// use summarease::layout::{LayoutConfig, ReportBuilder};
/// use summarease::model::Block;
///
/// let mut builder = ReportBuilder::new(LayoutConfig::default())?;
/// builder.start("out/report.pdf")?;
/// builder.append_block(&Block::title("Summary"))?;
/// builder.append_block(&Block::image("out/img/numeric_plot.png"))?;
/// let report = builder.finish()?;
/// println!("{} pages", report.page_count);
/// # Ok::<(), summarease::Error>(())
/// ```
pub struct ReportBuilder {
    config: LayoutConfig,
    info: DocumentInfo,
    state: State,
    stats: BuildStats,
}

impl ReportBuilder {
    /// Create a builder after validating the layout configuration.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            info: DocumentInfo::default(),
            state: State::Initial,
            stats: BuildStats::default(),
        })
    }

    /// Set the document metadata.
    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> BuildPhase {
        match self.state {
            State::Initial => BuildPhase::Initial,
            State::Building(_) => BuildPhase::Building,
            State::Finalized => BuildPhase::Finalized,
        }
    }

    /// Counters collected so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// The surface being built, while in the building phase.
    pub fn surface(&self) -> Option<&Surface> {
        match &self.state {
            State::Building(session) => Some(&session.surface),
            _ => None,
        }
    }

    /// Begin a document that will be written to `path`.
    ///
    /// Missing parent directories are created now. A path naming an existing
    /// directory is rejected.
    pub fn start<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        if !matches!(self.state, State::Initial) {
            return Err(Error::State(format!(
                "start() requires the initial phase, builder is {:?}",
                self.phase()
            )));
        }

        let target = resolve_path(path)?;
        if target.kind == PathKind::Directory {
            return Err(Error::Validation(format!(
                "The output path {} is a directory",
                target.path.display()
            )));
        }

        log::debug!("Starting report at {}", target.path.display());
        self.state = State::Building(Session {
            target,
            surface: Surface::new(self.config.clone()),
        });
        Ok(())
    }

    /// Begin a document at an [`OutputTarget`].
    pub fn start_target(&mut self, target: &OutputTarget) -> Result<()> {
        self.start(target.path())
    }

    /// Lay out one block at the cursor.
    ///
    /// A block that fails to render aborts the build: the builder is
    /// finalized without writing anything and later calls return
    /// [`Error::State`].
    pub fn append_block(&mut self, block: &Block) -> Result<Placement> {
        let result = self.place(block);
        if let Err(err) = &result {
            if !matches!(err, Error::State(_)) {
                log::warn!("Aborting report after a failed block: {}", err);
                self.state = State::Finalized;
            }
        }
        result
    }

    fn place(&mut self, block: &Block) -> Result<Placement> {
        let session = match &mut self.state {
            State::Building(session) => session,
            _ => {
                return Err(Error::State(format!(
                    "append_block() requires the building phase, builder is {:?}",
                    self.phase()
                )))
            }
        };
        let surface = &mut session.surface;

        let placement = match block {
            Block::Header { text, level } => {
                draw_header(surface, text, *level);
                self.stats.headers += 1;
                Placement::Header
            }
            Block::Table(table) => {
                if !table.is_empty() {
                    ensure_room(surface);
                }
                let layout = render_table(surface, table);
                if layout.column_groups == 0 {
                    self.stats.empty_tables += 1;
                } else {
                    surface.advance(self.config.block_spacing);
                    self.stats.tables += 1;
                    self.stats.table_rows += layout.rows_drawn;
                }
                Placement::Table(layout)
            }
            Block::Image(path) => {
                let extent = render_image(surface, path)?;
                self.stats.images += 1;
                Placement::Image(extent)
            }
        };

        Ok(placement)
    }

    /// Append several blocks in order, stopping at the first failure.
    pub fn append_all<'a, I>(&mut self, blocks: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        for block in blocks {
            self.append_block(block)?;
        }
        Ok(())
    }

    /// Serialize the document and write it to the output path.
    ///
    /// The builder is finalized afterwards even if writing fails.
    pub fn finish(&mut self) -> Result<FinishedReport> {
        let session = match std::mem::replace(&mut self.state, State::Finalized) {
            State::Building(session) => session,
            other => {
                self.state = other;
                return Err(Error::State(format!(
                    "finish() requires the building phase, builder is {:?}",
                    self.phase()
                )));
            }
        };

        let bytes = write_pdf(&session.surface, &self.info)?;
        fs::write(&session.target.path, &bytes)?;

        log::debug!(
            "Wrote {} ({} pages, {} bytes)",
            session.target.path.display(),
            session.surface.page_count(),
            bytes.len()
        );

        Ok(FinishedReport {
            path: session.target.path,
            page_count: session.surface.page_count(),
            bytes_written: bytes.len(),
            stats: self.stats,
        })
    }
}

fn draw_header(surface: &mut Surface, text: &str, level: HeaderLevel) {
    ensure_room(surface);

    let config = surface.config().clone();
    let size = level.font_size(
        config.title_font_size,
        config.section_font_size,
        config.caption_font_size,
    );
    let font = if level.is_bold() {
        Font::Bold
    } else {
        Font::Regular
    };
    let line_height = size * PT_TO_MM * LINE_SPACING;
    let text = truncate_to_width(text, config.content_width(), size, font);

    let baseline = surface.cursor_y() + line_height * 0.7;
    surface.push(DrawOp::Text {
        x: config.margin_left,
        y: baseline,
        size,
        font,
        text: text.into_owned(),
    });
    surface.advance(line_height);

    if level == HeaderLevel::Section {
        let y = surface.cursor_y();
        surface.push(DrawOp::Line {
            x1: config.margin_left,
            y1: y,
            x2: config.margin_left + config.content_width(),
            y2: y,
            width: 0.4,
        });
        surface.advance(RULE_GAP);
    }
}
