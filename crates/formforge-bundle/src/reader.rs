//! Reading packaged archives back.

use crate::{PackagingError, PackagingResult};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Reader over a packaged archive held in memory.
///
/// # Example
///
/// ```no_run
/// use formforge_bundle::ArchiveReader;
///
/// let mut reader = ArchiveReader::open("Contact-generated-code.zip")?;
/// for path in reader.list_files() {
///     println!("{path}");
/// }
/// let readme = reader.read_file_string("README.md")?;
/// # Ok::<(), formforge_bundle::PackagingError>(())
/// ```
#[derive(Debug)]
pub struct ArchiveReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl ArchiveReader {
    /// Read archive bytes, e.g. the output of [`package`](crate::package).
    pub fn new(bytes: Vec<u8>) -> PackagingResult<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { archive })
    }

    /// Open an archive file.
    pub fn open<P: AsRef<Path>>(path: P) -> PackagingResult<Self> {
        Self::new(fs::read(path)?)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Entry paths in archive order.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    #[must_use]
    pub fn has_file(&self, path: &str) -> bool {
        self.archive.index_for_name(path).is_some()
    }

    /// Read an entry as bytes.
    pub fn read_file(&mut self, path: &str) -> PackagingResult<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| PackagingError::MissingEntry(path.to_string()))?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read an entry as UTF-8 text.
    pub fn read_file_string(&mut self, path: &str) -> PackagingResult<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| PackagingError::MissingEntry(path.to_string()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Digest over every entry path and text, in archive order.
    ///
    /// Matches [`GeneratedCodeBundle::content_digest`](formforge_core::GeneratedCodeBundle::content_digest)
    /// of the bundle the archive was packaged from.
    pub fn content_digest(&mut self) -> PackagingResult<String> {
        let mut entries = Vec::with_capacity(self.len());
        for path in self.list_files() {
            let content = self.read_file_string(&path)?;
            entries.push((path, content));
        }
        Ok(formforge_core::content_digest(
            entries.iter().map(|(p, c)| (p.as_str(), c.as_str())),
        ))
    }
}
