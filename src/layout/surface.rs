//! The drawing surface: pages of positioned drawing operations.

use super::text::Font;
use super::LayoutConfig;
use std::path::PathBuf;

/// A positioned drawing operation.
///
/// Coordinates are millimetres from the top-left corner of the page. For
/// text, `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    /// A filled rectangle in a gray level (0 = black, 1 = white)
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
    /// A black stroked line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    /// A placed image, referencing [`Surface::images`] by index
    Image {
        image: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Decoded RGB8 pixels of an embedded image.
#[derive(Debug, Clone)]
pub struct ImageResource {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Packed RGB8 samples, row-major
    pub rgb: Vec<u8>,
    /// File the image was loaded from
    pub source: PathBuf,
}

/// Drawing operations of one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Operations in paint order
    pub ops: Vec<DrawOp>,
}

/// An append-only sequence of pages with a vertical cursor.
///
/// The surface always holds at least one page. Only the page-flow functions
/// start new pages.
#[derive(Debug, Clone)]
pub struct Surface {
    config: LayoutConfig,
    completed: Vec<PageContent>,
    current: PageContent,
    cursor_y: f32,
    images: Vec<ImageResource>,
}

impl Surface {
    /// Create a surface with one blank page and the cursor at the top margin.
    pub fn new(config: LayoutConfig) -> Self {
        let cursor_y = config.margin_top;
        Self {
            config,
            completed: Vec::new(),
            current: PageContent::default(),
            cursor_y,
            images: Vec::new(),
        }
    }

    /// Layout configuration the surface was created with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of pages, including the current one.
    pub fn page_count(&self) -> usize {
        self.completed.len() + 1
    }

    /// Cursor offset from the top of the current page.
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    /// Check if the cursor sits at the top margin of the current page.
    pub fn at_page_top(&self) -> bool {
        (self.cursor_y - self.config.margin_top).abs() < f32::EPSILON
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining_height(&self) -> f32 {
        self.config.bottom_limit() - self.cursor_y
    }

    /// Add a drawing operation to the current page.
    pub fn push(&mut self, op: DrawOp) {
        self.current.ops.push(op);
    }

    /// Register decoded image pixels and return their index.
    pub fn add_image(&mut self, image: ImageResource) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    /// All registered images.
    pub fn images(&self) -> &[ImageResource] {
        &self.images
    }

    /// All pages in order, the current one last.
    pub fn pages(&self) -> impl Iterator<Item = &PageContent> {
        self.completed.iter().chain(std::iter::once(&self.current))
    }

    /// Operations on the current page.
    pub fn current_ops(&self) -> &[DrawOp] {
        &self.current.ops
    }

    /// Close the current page and open a blank one with the cursor at the
    /// top margin.
    pub(crate) fn start_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.completed.push(finished);
        self.cursor_y = self.config.margin_top;
    }
}
