//! Error types for summarease library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for summarease operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while summarizing a dataset or building a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A public argument has a value outside its accepted set or range.
    #[error("{0}")]
    Validation(String),

    /// A public argument is of a kind that cannot be used at all
    /// (non-finite dimensions, empty paths, text where numbers are required).
    #[error("{0}")]
    InvalidType(String),

    /// A referenced file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The image format is not one the report can embed.
    #[error("Unsupported image format. Should be one of png, jpg, jpeg. You have {0}")]
    UnsupportedFormat(String),

    /// A report builder operation was invoked in the wrong state.
    #[error("Invalid report state: {0}")]
    State(String),

    /// A named column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The dataset could not be read or is structurally invalid.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Error decoding or encoding an image.
    #[error("Image error: {0}")]
    Image(String),

    /// Error assembling the PDF document.
    #[error("PDF generation error: {0}")]
    Pdf(String),

    /// Error serializing a summary.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(e) = err.into_kind() {
                return Error::Io(e);
            }
            return Error::Dataset("unreadable CSV input".to_string());
        }
        Error::Dataset(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
