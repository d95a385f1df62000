//! Page geometry and layout configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Page geometry, spacing and typography used by the layout engine.
///
/// All lengths are millimetres measured from the top-left corner of the
/// page; font sizes are points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page width (A4 = 210)
    pub page_width: f32,

    /// Page height (A4 = 297)
    pub page_height: f32,

    /// Left margin
    pub margin_left: f32,

    /// Right margin
    pub margin_right: f32,

    /// Top margin, where the cursor starts on a new page
    pub margin_top: f32,

    /// Bottom margin; nothing is drawn below `page_height - margin_bottom`
    pub margin_bottom: f32,

    /// Padding around images, in whole millimetres
    pub image_padding: u32,

    /// Cursor offset past which a header starts a new page
    pub page_break_threshold: f32,

    /// Vertical gap after each table
    pub block_spacing: f32,

    /// Height of one table row
    pub row_height: f32,

    /// Narrowest column before a wide table is split into column groups
    pub min_column_width: f32,

    /// Digits after the decimal point for float cells
    pub float_precision: usize,

    /// Title font size
    pub title_font_size: f32,

    /// Section header font size
    pub section_font_size: f32,

    /// Caption font size
    pub caption_font_size: f32,

    /// Table cell font size
    pub table_font_size: f32,
}

impl LayoutConfig {
    /// Create a layout config with A4 defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_left = margin;
        self.margin_right = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }

    /// Set the image padding.
    pub fn with_image_padding(mut self, padding: u32) -> Self {
        self.image_padding = padding;
        self
    }

    /// Set the page-break threshold.
    pub fn with_page_break_threshold(mut self, threshold: f32) -> Self {
        self.page_break_threshold = threshold;
        self
    }

    /// Set the table row height.
    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    /// Set the minimum column width.
    pub fn with_min_column_width(mut self, width: f32) -> Self {
        self.min_column_width = width;
        self
    }

    /// Set the float precision.
    pub fn with_float_precision(mut self, digits: usize) -> Self {
        self.float_precision = digits;
        self
    }

    /// Width available between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest cursor position content may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Check the configuration for unusable values.
    ///
    /// Non-finite or non-positive lengths are [`Error::InvalidType`]; values
    /// that are numbers but leave no room to draw are [`Error::Validation`].
    pub fn validate(&self) -> Result<()> {
        validate_page_dimensions(self.page_width, self.page_height)?;

        let lengths = [
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("page_break_threshold", self.page_break_threshold),
            ("block_spacing", self.block_spacing),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidType(format!(
                    "'{}' must be a finite, non-negative number, got {}",
                    name, value
                )));
            }
        }

        let sizes = [
            ("row_height", self.row_height),
            ("min_column_width", self.min_column_width),
            ("title_font_size", self.title_font_size),
            ("section_font_size", self.section_font_size),
            ("caption_font_size", self.caption_font_size),
            ("table_font_size", self.table_font_size),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidType(format!(
                    "'{}' must be a finite, positive number, got {}",
                    name, value
                )));
            }
        }

        if self.content_width() <= 0.0 || self.margin_top >= self.bottom_limit() {
            return Err(Error::Validation(
                "Page margins leave no drawable area".to_string(),
            ));
        }
        validate_padding(self.image_padding, self.page_width, self.page_height)?;

        if self.page_break_threshold < self.margin_top
            || self.page_break_threshold >= self.bottom_limit()
        {
            return Err(Error::Validation(format!(
                "'page_break_threshold' must lie between the top margin ({}) and the bottom limit ({}), got {}",
                self.margin_top,
                self.bottom_limit(),
                self.page_break_threshold
            )));
        }
        if self.row_height >= self.bottom_limit() - self.margin_top {
            return Err(Error::Validation(
                "'row_height' is taller than the drawable page area".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 15.0,
            margin_right: 15.0,
            margin_top: 15.0,
            margin_bottom: 15.0,
            image_padding: 15,
            page_break_threshold: 50.0,
            block_spacing: 4.0,
            row_height: 7.0,
            min_column_width: 22.0,
            float_precision: 2,
            title_font_size: 18.0,
            section_font_size: 13.0,
            caption_font_size: 9.0,
            table_font_size: 8.0,
        }
    }
}

/// Check that page dimensions are finite positive numbers.
pub fn validate_page_dimensions(width: f32, height: f32) -> Result<()> {
    for (name, value) in [("page_width", width), ("page_height", height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidType(format!(
                "'{}' must be a finite, positive number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Check that image padding leaves a positive drawable area.
pub fn validate_padding(padding: u32, width: f32, height: f32) -> Result<()> {
    let twice = 2.0 * padding as f32;
    if twice >= width || twice >= height {
        return Err(Error::Validation(format!(
            "'padding' of {} leaves no drawable area on a {}x{} page",
            padding, width, height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid_a4() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.content_width(), 180.0);
        assert_eq!(config.bottom_limit(), 282.0);
    }

    #[test]
    fn test_non_finite_dimensions() {
        let config = LayoutConfig::new().with_page_size(f32::NAN, 297.0);
        assert!(matches!(config.validate(), Err(Error::InvalidType(_))));

        let config = LayoutConfig::new().with_page_size(210.0, -1.0);
        assert!(matches!(config.validate(), Err(Error::InvalidType(_))));
    }

    #[test]
    fn test_padding_too_large() {
        let config = LayoutConfig::new().with_image_padding(105);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_threshold_must_be_on_page() {
        let config = LayoutConfig::new().with_page_break_threshold(5.0);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let config = LayoutConfig::new().with_page_break_threshold(290.0);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"page_break_threshold": 80.0}"#).unwrap();
        assert_eq!(config.page_break_threshold, 80.0);
        assert_eq!(config.page_width, 210.0);
    }
}
