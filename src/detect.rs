//! Image format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image formats the report can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl ImageKind {
    /// Matching decoder format.
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// PNG magic bytes
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
/// JPEG start-of-image marker
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Supported image extensions, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Determine the image kind from a path's extension.
///
/// # Returns
/// * `Ok(ImageKind)` for `png`, `jpg` and `jpeg` (any case)
/// * `Err(Error::UnsupportedFormat)` naming the offending extension otherwise
pub fn detect_kind_from_extension<P: AsRef<Path>>(path: P) -> Result<ImageKind> {
    let ext = path
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok(ImageKind::Png),
        "jpg" | "jpeg" => Ok(ImageKind::Jpeg),
        _ => Err(Error::UnsupportedFormat(ext)),
    }
}

/// Detect the image kind from a file's leading bytes.
///
/// # Example
/// ```no_run
/// use summarease::detect::detect_kind_from_path;
///
/// let kind = detect_kind_from_path("img/numeric_plot.png").unwrap();
/// println!("Image kind: {}", kind);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<ImageKind> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(PNG_MAGIC.len());
    reader.take(PNG_MAGIC.len() as u64).read_to_end(&mut header)?;
    detect_kind_from_bytes(&header)
}

/// Detect the image kind from bytes.
///
/// # Returns
/// * `Ok(ImageKind)` if the data starts with a PNG or JPEG signature
/// * `Err(Error::UnsupportedFormat)` otherwise
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<ImageKind> {
    if data.starts_with(PNG_MAGIC) {
        return Ok(ImageKind::Png);
    }
    if data.starts_with(JPEG_MAGIC) {
        return Ok(ImageKind::Jpeg);
    }
    Err(Error::UnsupportedFormat(
        "file content is neither PNG nor JPEG".to_string(),
    ))
}

/// Check if a file is an embeddable image.
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    detect_kind_from_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(detect_kind_from_bytes(data).unwrap(), ImageKind::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(detect_kind_from_bytes(&data).unwrap(), ImageKind::Jpeg);
    }

    #[test]
    fn test_detect_invalid_content() {
        let result = detect_kind_from_bytes(b"age,gender\n");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_extension_check() {
        assert_eq!(
            detect_kind_from_extension("plot.PNG").unwrap(),
            ImageKind::Png
        );
        assert_eq!(
            detect_kind_from_extension("photo.jpeg").unwrap(),
            ImageKind::Jpeg
        );
        match detect_kind_from_extension("valid_image.csv") {
            Err(Error::UnsupportedFormat(ext)) => assert_eq!(ext, "csv"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_detect_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46]).unwrap();
        assert_eq!(detect_kind_from_path(&path).unwrap(), ImageKind::Jpeg);

        let short = dir.path().join("short.png");
        std::fs::write(&short, b"\x89P").unwrap();
        assert!(matches!(
            detect_kind_from_path(&short),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extension_missing() {
        assert!(matches!(
            detect_kind_from_extension("noext"),
            Err(Error::UnsupportedFormat(ext)) if ext.is_empty()
        ));
    }
}
