//! Error types for packaging.

use thiserror::Error;

/// Errors that can occur while writing or reading an archive.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Two files resolved to the same archive path.
    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),

    /// Entry requested from an archive that does not contain it.
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),
}
