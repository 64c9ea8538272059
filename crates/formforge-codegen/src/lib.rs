//! formforge-codegen - Emitters and the project assembler
//!
//! This crate turns a [`FormStructure`](formforge_core::FormStructure) into
//! source files:
//! - [`plan`] fixes every identifier once so all emitters agree
//! - [`validation`] renders Yup, Zod, Joi, and class-validator schemas
//! - [`frontend`] renders the React component and its test suite
//! - [`sql`] renders the generic and T-SQL schema scripts
//! - [`backend`] renders the Express and ASP.NET Core APIs
//! - [`docs`] renders the README and reference pages
//! - [`assemble()`] runs them all and returns an
//!   [`AssemblyReport`](formforge_core::AssemblyReport)

pub mod assemble;
pub mod backend;
pub mod docs;
pub mod frontend;
pub mod manifest;
pub mod plan;
pub mod sql;
mod text;
pub mod validation;

pub use assemble::{assemble, assemble_at};
pub use backend::{BackendStyle, emit_backend, emit_backend_tests};
pub use frontend::{emit_component, emit_frontend, emit_frontend_tests};
pub use plan::{FormPlan, PlannedField, ProjectNames};
pub use sql::{SqlDialect, emit_sql_schema};
pub use validation::{emit_validation_schema, schema_entry};
