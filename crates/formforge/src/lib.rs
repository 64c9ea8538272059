//! # formforge
//!
//! Generate a complete project from a form definition: a React component
//! with schema validation, a SQL schema, a REST backend, tests, and docs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use formforge::prelude::*;
//!
//! let form = FormStructure::new("Contact")
//!     .with_field(FieldDescriptor::new("f1", "Name", FieldKind::Text).required())
//!     .with_field(FieldDescriptor::new("f2", "Email", FieldKind::Email).required());
//!
//! let options = GenerationOptions {
//!     include_backend: true,
//!     ..GenerationOptions::default()
//! };
//!
//! let archive = formforge::generate_archive(&form, "Contact", &options)?;
//! for warning in &archive.report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! std::fs::write(&archive.file_name, &archive.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`formforge_core`] - Form model, naming, type mappings, options
//! - [`formforge_codegen`] - Emitters and the project assembler
//! - [`formforge_bundle`] - Zip packaging

pub use formforge_core::{
    AssemblyReport, BackendFramework, Category, FieldDescriptor, FieldKind, FormLibrary,
    FormSchema, FormStructure, FrontendTemplate, GeneratedCodeBundle, GeneratedFile,
    GenerationError, GenerationOptions, GenerationResult, GenerationWarning, Language, Styling,
    ValidationLibrary, adapt, reverse_adapt,
};

pub use formforge_codegen::{
    BackendStyle, FormPlan, SqlDialect, assemble, assemble_at, emit_sql_schema,
};

pub use formforge_bundle::{
    ArchiveReader, PackagingError, PackagingResult, archive_checksum, download_file_name, package,
};

pub use formforge_bundle as bundle;
pub use formforge_codegen as codegen;

pub use serde;
pub use serde_json;
pub use tracing;

/// Failure of an end-to-end generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Packaging(#[from] PackagingError),
}

/// A packaged project ready to be written or served.
#[derive(Debug, Clone)]
pub struct GeneratedArchive {
    /// Download name, e.g. `Contact-generated-code.zip`.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: AssemblyReport,
}

/// Assemble a project and package it.
pub fn generate_archive(
    structure: &FormStructure,
    project_name: &str,
    options: &GenerationOptions,
) -> Result<GeneratedArchive, Error> {
    let report = assemble(structure, project_name, options)?;
    let bytes = package(&report.bundle)?;
    Ok(GeneratedArchive {
        file_name: download_file_name(report.bundle.project_name()),
        bytes,
        report,
    })
}

/// Prelude module for convenient imports.
///
/// Use `use formforge::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        AssemblyReport, BackendFramework, Category, FieldDescriptor, FieldKind, FormLibrary,
        FormSchema, FormStructure, FrontendTemplate, GeneratedCodeBundle, GeneratedFile,
        GenerationOptions, GenerationWarning, Styling, ValidationLibrary, assemble,
        generate_archive, package,
    };
    pub use formforge_core::{RuleKind, ValidationRule};
}
