//! Image block rendering.

use super::config::{validate_padding, validate_page_dimensions};
use super::flow::{ensure_fits, ensure_room};
use super::surface::{DrawOp, ImageResource, Surface};
use crate::detect::{detect_kind_from_extension, detect_kind_from_path};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Size of an image as placed on the page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedExtent {
    /// Placed width
    pub width: f32,
    /// Placed height
    pub height: f32,
    /// Uniform scale applied to the natural size
    pub scale: f32,
}

/// Scale an image uniformly so it fits the page minus `padding` on each side.
///
/// The scale is `min((W - 2p) / w, (H - 2p) / h)`, so small images are
/// enlarged and the aspect ratio is always kept.
pub fn fit_image(
    natural_width: f32,
    natural_height: f32,
    page_width: f32,
    page_height: f32,
    padding: u32,
) -> Result<RenderedExtent> {
    validate_page_dimensions(page_width, page_height)?;
    for (name, value) in [("width", natural_width), ("height", natural_height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidType(format!(
                "Image {} must be a finite, positive number, got {}",
                name, value
            )));
        }
    }
    validate_padding(padding, page_width, page_height)?;

    let pad = 2.0 * padding as f32;
    let scale = ((page_width - pad) / natural_width).min((page_height - pad) / natural_height);

    Ok(RenderedExtent {
        width: natural_width * scale,
        height: natural_height * scale,
        scale,
    })
}

/// Shrink an extent that would spill past the page margins.
fn clamp_to_body(extent: RenderedExtent, body_width: f32, body_height: f32) -> RenderedExtent {
    let shrink = (body_width / extent.width)
        .min(body_height / extent.height)
        .min(1.0);
    if shrink >= 1.0 {
        return extent;
    }
    RenderedExtent {
        width: extent.width * shrink,
        height: extent.height * shrink,
        scale: extent.scale * shrink,
    }
}

/// Load, fit and draw the image at `path`, centred at the cursor.
///
/// The checks run in a fixed order: the extension must be `png`, `jpg` or
/// `jpeg`, then the file must exist, then its content must be PNG or JPEG.
/// Nothing is drawn and no page is added when any check fails.
pub fn render_image<P: AsRef<Path>>(surface: &mut Surface, path: P) -> Result<RenderedExtent> {
    let path = path.as_ref();

    let declared = detect_kind_from_extension(path)?;
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let actual = detect_kind_from_path(path)?;
    if actual != declared {
        log::warn!(
            "{} has a {} extension but {} content",
            path.display(),
            declared,
            actual
        );
    }

    let decoded = image::load(BufReader::new(File::open(path)?), actual.image_format())?;
    let rgb = decoded.to_rgb8();
    let (px_width, px_height) = rgb.dimensions();

    let config = surface.config().clone();
    let extent = fit_image(
        px_width as f32,
        px_height as f32,
        config.page_width,
        config.page_height,
        config.image_padding,
    )?;
    let extent = clamp_to_body(
        extent,
        config.content_width(),
        config.bottom_limit() - config.margin_top,
    );

    ensure_room(surface);
    ensure_fits(surface, extent.height);

    log::debug!(
        "Placing {} ({}x{}px) at {:.1}x{:.1}mm",
        path.display(),
        px_width,
        px_height,
        extent.width,
        extent.height
    );

    let image = surface.add_image(ImageResource {
        width: px_width,
        height: px_height,
        rgb: rgb.into_raw(),
        source: path.to_path_buf(),
    });
    let y = surface.cursor_y();
    surface.push(DrawOp::Image {
        image,
        x: (config.page_width - extent.width) / 2.0,
        y,
        width: extent.width,
        height: extent.height,
    });
    surface.advance(extent.height + config.image_padding as f32);

    Ok(extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use tempfile::tempdir;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_fit_tall_image() {
        let extent = fit_image(2000.0, 3000.0, 210.0, 297.0, 15).unwrap();
        assert!(extent.width <= 180.0);
        assert!(close(extent.width, 178.0));
        assert!(close(extent.height, 267.0));
    }

    #[test]
    fn test_fit_wide_image() {
        let extent = fit_image(800.0, 600.0, 210.0, 297.0, 15).unwrap();
        assert!(close(extent.width, 180.0));
        assert!(close(extent.height, 135.0));
    }

    #[test]
    fn test_fit_small_image() {
        let extent = fit_image(200.0, 300.0, 210.0, 297.0, 15).unwrap();
        assert!(close(extent.scale, 0.89));
        assert!(close(extent.width, 178.0));
        assert!(close(extent.height, 267.0));

        let extent = fit_image(100.0, 150.0, 210.0, 297.0, 15).unwrap();
        assert!(close(extent.scale, 1.78));
        assert!(close(extent.width, 178.0));
        assert!(close(extent.height, 267.0));
    }

    #[test]
    fn test_small_padding_stays_within_margins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tall.png");
        image::RgbImage::from_pixel(200, 3000, image::Rgb([0, 0, 0]))
            .save(&path)
            .unwrap();

        let config = LayoutConfig::new().with_image_padding(5);
        assert!(config.validate().is_ok());
        let mut surface = Surface::new(config.clone());
        let extent = render_image(&mut surface, &path).unwrap();

        match &surface.current_ops()[0] {
            DrawOp::Image { x, y, width, height, .. } => {
                assert!(*y + *height <= config.bottom_limit() + 1e-3);
                assert!(*x >= config.margin_left - 1e-3);
                assert!(*x + *width <= config.page_width - config.margin_right + 1e-3);
                assert!(close(*height, extent.height));
            }
            other => panic!("unexpected op: {:?}", other),
        }
        assert!(close(extent.width / extent.height, 200.0 / 3000.0));
    }

    #[test]
    fn test_fit_rejects_bad_page() {
        assert!(matches!(
            fit_image(100.0, 100.0, f32::INFINITY, 297.0, 15),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            fit_image(100.0, 100.0, 210.0, 0.0, 15),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            fit_image(100.0, 100.0, 210.0, 297.0, 200),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_render_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("valid_image.csv");
        std::fs::write(&path, "a,b\n").unwrap();

        let mut surface = Surface::new(LayoutConfig::default());
        let result = render_image(&mut surface, &path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(ext)) if ext == "csv"));
        assert!(surface.current_ops().is_empty());
    }

    #[test]
    fn test_render_missing_file() {
        let mut surface = Surface::new(LayoutConfig::default());
        let result = render_image(&mut surface, "no/such/image.jpg");
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(surface.page_count(), 1);
    }

    #[test]
    fn test_render_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        image::RgbImage::from_pixel(800, 600, image::Rgb([200, 10, 10]))
            .save(&path)
            .unwrap();

        let mut surface = Surface::new(LayoutConfig::default());
        let extent = render_image(&mut surface, &path).unwrap();
        assert!(close(extent.width, 180.0));
        assert_eq!(surface.images().len(), 1);
        assert!(close(surface.cursor_y(), 15.0 + 135.0 + 15.0));
        match &surface.current_ops()[0] {
            DrawOp::Image { x, .. } => assert!(close(*x, 15.0)),
            other => panic!("unexpected op: {:?}", other),
        }
    }
}
