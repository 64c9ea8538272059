//! Zip packaging of a generated bundle.

use crate::{PackagingError, PackagingResult};
use chrono::{DateTime, Datelike, Timelike, Utc};
use formforge_core::GeneratedCodeBundle;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Suffix of every download name.
pub const DOWNLOAD_SUFFIX: &str = "-generated-code.zip";

/// Write every file of `bundle` into an in-memory Deflate archive.
///
/// Entries are written category by category, files in insertion order, at
/// their archive paths. Every entry carries the bundle timestamp. Two files
/// with the same archive path are rejected before anything is written.
pub fn package(bundle: &GeneratedCodeBundle) -> PackagingResult<Vec<u8>> {
    let mut seen = HashSet::new();
    for file in bundle.files() {
        let path = file.archive_path();
        if !seen.insert(path.clone()) {
            return Err(PackagingError::DuplicateEntry(path));
        }
    }

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(entry_time(bundle.generated_at()));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for file in bundle.files() {
        zip.start_file(file.archive_path(), options)?;
        zip.write_all(file.content().as_bytes())?;
    }
    let bytes = zip.finish()?.into_inner();

    tracing::debug!(
        project = %bundle.project_name(),
        entries = seen.len(),
        bytes = bytes.len(),
        "packaged bundle"
    );
    Ok(bytes)
}

/// Package `bundle` and write it into `output_dir` under its download name,
/// made safe as a single path component (see [`saved_file_name`]).
///
/// Returns the path of the written archive.
pub fn write_archive<P: AsRef<Path>>(
    bundle: &GeneratedCodeBundle,
    output_dir: P,
) -> PackagingResult<PathBuf> {
    let output_dir = output_dir.as_ref();
    let bytes = package(bundle)?;

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(saved_file_name(bundle.project_name()));
    fs::write(&path, bytes)?;
    Ok(path)
}

/// File name offered for download: whitespace runs become `-`, then
/// `-generated-code.zip` is appended. Other characters are kept.
#[must_use]
pub fn download_file_name(project_name: &str) -> String {
    let mut name = String::with_capacity(project_name.len() + DOWNLOAD_SUFFIX.len());
    let mut in_space = false;
    for c in project_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('-');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    name.push_str(DOWNLOAD_SUFFIX);
    name
}

/// [`download_file_name`] as a single file name inside a directory: path
/// separators and control characters become `-`, so the name can never
/// leave the directory it is joined onto.
#[must_use]
pub fn saved_file_name(project_name: &str) -> String {
    download_file_name(project_name)
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// SHA256 of archive bytes as `sha256:<hex>`.
#[must_use]
pub fn archive_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Zip entries hold DOS timestamps: 1980 to 2107, two-second resolution.
/// Times outside that range clamp to the DOS epoch.
fn entry_time(at: DateTime<Utc>) -> zip::DateTime {
    let Ok(year) = u16::try_from(at.year()) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(
        year,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second() as u8,
    )
    .unwrap_or_default()
}
