//! Zip packaging for formforge
//!
//! This crate turns a [`GeneratedCodeBundle`](formforge_core::GeneratedCodeBundle)
//! into a downloadable archive and reads archives back.
//!
//! # Archive Structure
//!
//! ```text
//! Contact-generated-code.zip
//! ├── README.md
//! ├── frontend/
//! │   ├── package.json
//! │   └── src/components/ContactForm.tsx
//! ├── backend/                    # with include_backend
//! │   ├── sql/schema.sql
//! │   └── ...
//! └── docs/                       # with include_documentation
//!     └── FIELDS.md
//! ```
//!
//! # Example
//!
//! ```no_run
//! use formforge_bundle::{ArchiveReader, download_file_name, package};
//! use formforge_codegen::assemble;
//! use formforge_core::{FieldDescriptor, FieldKind, FormStructure, GenerationOptions};
//!
//! let form = FormStructure::new("Contact")
//!     .with_field(FieldDescriptor::new("f1", "Name", FieldKind::Text).required());
//! let report = assemble(&form, "Contact", &GenerationOptions::default())?;
//!
//! let bytes = package(&report.bundle)?;
//! std::fs::write(download_file_name("Contact"), &bytes)?;
//!
//! let reader = ArchiveReader::new(bytes)?;
//! assert!(reader.has_file("README.md"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub mod archive;
pub mod reader;

pub use archive::{archive_checksum, download_file_name, package, saved_file_name, write_archive};
pub use error::PackagingError;
pub use reader::ArchiveReader;

/// Result type for packaging operations.
pub type PackagingResult<T> = Result<T, PackagingError>;
