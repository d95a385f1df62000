//! Output path validation and creation.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What a validated path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An existing directory
    Directory,
    /// A file path whose parent directory exists
    File,
}

/// A path that passed validation and whose parent directory exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath {
    /// The path as given
    pub path: PathBuf,
    /// Directory or file
    pub kind: PathKind,
}

/// Validate `path` and create its missing parent directories.
///
/// An existing directory is accepted as is. For anything else the parent
/// directory is created recursively; calling this again is a no-op.
/// Directory creation errors are returned unchanged.
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ValidatedPath> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        return Err(Error::InvalidType("The path must not be empty".to_string()));
    }
    if path.as_os_str().to_string_lossy().contains('\0') {
        return Err(Error::InvalidType(
            "The path must not contain NUL characters".to_string(),
        ));
    }

    if path.is_dir() {
        return Ok(ValidatedPath {
            path: path.to_path_buf(),
            kind: PathKind::Directory,
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            log::debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    Ok(ValidatedPath {
        path: path.to_path_buf(),
        kind: PathKind::File,
    })
}

/// Where a report is written: an output directory and a PDF file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    dir: PathBuf,
    file: PathBuf,
}

impl OutputTarget {
    /// Create an output target.
    ///
    /// A file name without an extension gets `.pdf` appended; any extension
    /// other than `.pdf` is rejected.
    pub fn new(dir: impl Into<PathBuf>, file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        if file.as_os_str().is_empty() {
            return Err(Error::InvalidType(
                "The 'output_file' must not be empty".to_string(),
            ));
        }

        let file = match file.extension() {
            None => file.with_extension("pdf"),
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => file.to_path_buf(),
            Some(_) => {
                return Err(Error::Validation(
                    "The 'output_file' should either have a .pdf extension or no extension"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            dir: dir.into(),
            file,
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the PDF file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    /// Directory chart images are written to.
    pub fn image_dir(&self) -> PathBuf {
        self.dir.join("img")
    }

    /// Validate the PDF path and create its parent directories.
    pub fn resolve(&self) -> Result<ValidatedPath> {
        let resolved = resolve_path(self.path())?;
        if resolved.kind == PathKind::Directory {
            return Err(Error::Validation(format!(
                "The output path {} is a directory",
                resolved.path.display()
            )));
        }
        Ok(resolved)
    }
}
