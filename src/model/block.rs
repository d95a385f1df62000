//! Report content blocks.

use super::Table;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A content block appended to a report.
///
/// Blocks are immutable input. They own no rendering state; the layout
/// engine decides where each one lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A single styled line of text
    Header {
        /// Header text
        text: String,
        /// Visual level
        level: HeaderLevel,
    },
    /// A tabular summary
    Table(Table),
    /// An image file (png, jpg, jpeg)
    Image(PathBuf),
}

impl Block {
    /// Create a title header.
    pub fn title(text: impl Into<String>) -> Self {
        Block::Header {
            text: text.into(),
            level: HeaderLevel::Title,
        }
    }

    /// Create a section header.
    pub fn section(text: impl Into<String>) -> Self {
        Block::Header {
            text: text.into(),
            level: HeaderLevel::Section,
        }
    }

    /// Create a caption line.
    pub fn caption(text: impl Into<String>) -> Self {
        Block::Header {
            text: text.into(),
            level: HeaderLevel::Caption,
        }
    }

    /// Create an image block.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Block::Image(path.into())
    }

    /// Short name of the block kind, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Header { .. } => "header",
            Block::Table(_) => "table",
            Block::Image(_) => "image",
        }
    }
}

/// Visual level of a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLevel {
    /// Report title
    Title,
    /// Section heading with a rule underneath
    #[default]
    Section,
    /// Small explanatory line
    Caption,
}

impl HeaderLevel {
    /// Font size in points for the given layout sizes.
    pub fn font_size(&self, title: f32, section: f32, caption: f32) -> f32 {
        match self {
            HeaderLevel::Title => title,
            HeaderLevel::Section => section,
            HeaderLevel::Caption => caption,
        }
    }

    /// Check if the level is drawn in the bold face.
    pub fn is_bold(&self) -> bool {
        !matches!(self, HeaderLevel::Caption)
    }
}
