//! A minimal RGB raster for chart drawing.

use crate::error::Result;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);
pub const BAR: Rgb<u8> = Rgb([70, 110, 180]);
pub const ACCENT: Rgb<u8> = Rgb([214, 96, 77]);
pub const MUTED: Rgb<u8> = Rgb([200, 200, 200]);

/// Pixel rectangle inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `margin` pixels on every side.
    pub fn inset(&self, margin: u32) -> Rect {
        Rect {
            x: self.x + margin,
            y: self.y + margin,
            width: self.width.saturating_sub(2 * margin),
            height: self.height.saturating_sub(2 * margin),
        }
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// White RGB image with clipped rectangle drawing.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width.max(1), height.max(1), WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Fill a rectangle; parts outside the canvas are dropped.
    pub fn fill(&mut self, rect: Rect, color: Rgb<u8>) {
        let x_end = (rect.x + rect.width).min(self.width());
        let y_end = (rect.y + rect.height).min(self.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    pub fn hline(&mut self, x: u32, y: u32, length: u32, color: Rgb<u8>) {
        self.fill(Rect::new(x, y, length, 1), color);
    }

    pub fn vline(&mut self, x: u32, y: u32, length: u32, color: Rgb<u8>) {
        self.fill(Rect::new(x, y, 1, length), color);
    }

    /// Draw the left and bottom axes of a plot area.
    pub fn axes(&mut self, area: Rect) {
        self.vline(area.x, area.y, area.height + 1, AXIS);
        self.hline(area.x, area.bottom(), area.width + 1, AXIS);
    }

    /// Draw vertical bars, scaled so `max` reaches the top of `area`.
    pub fn bars(&mut self, area: Rect, values: &[f64], max: f64, color: Rgb<u8>) {
        self.bars_with(area, values, max, |_| color);
    }

    /// Like [`Canvas::bars`], with a colour per bar index.
    pub fn bars_with<F>(&mut self, area: Rect, values: &[f64], max: f64, color: F)
    where
        F: Fn(usize) -> Rgb<u8>,
    {
        if values.is_empty() || area.width == 0 {
            return;
        }
        for i in 1..4 {
            self.hline(area.x, area.y + area.height * i / 4, area.width, GRID);
        }

        let slot = area.width as f64 / values.len() as f64;
        let gap = (slot * 0.15).floor() as u32;
        for (i, &value) in values.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 || max <= 0.0 {
                continue;
            }
            let height = ((value / max).min(1.0) * area.height as f64).round() as u32;
            let x = area.x + (i as f64 * slot).floor() as u32 + gap;
            let width = (slot.floor() as u32).saturating_sub(2 * gap).max(1);
            self.fill(
                Rect::new(x, area.bottom() - height, width, height),
                color(i),
            );
        }
        self.axes(area);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Write the canvas as PNG.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill(Rect::new(8, 8, 5, 5), BAR);
        assert_eq!(canvas.pixel(9, 9), BAR);
        assert_eq!(canvas.pixel(7, 7), WHITE);
    }

    #[test]
    fn test_bars_scale_to_max() {
        let mut canvas = Canvas::new(100, 100);
        let area = Rect::new(10, 10, 80, 80);
        canvas.bars(area, &[1.0, 2.0], 2.0, BAR);
        // The taller bar reaches the top of the area.
        assert_eq!(canvas.pixel(70, 11), BAR);
        assert_eq!(canvas.pixel(30, 11), WHITE);
        assert_eq!(canvas.pixel(30, 80), BAR);
    }

    #[test]
    fn test_inset() {
        let rect = Rect::new(0, 0, 10, 10).inset(2);
        assert_eq!(rect, Rect::new(2, 2, 6, 6));
        assert_eq!(Rect::new(0, 0, 3, 3).inset(2).width, 0);
    }
}
