//! Project assembly: run every emitter the options ask for and collect the
//! result into one bundle.

use crate::backend::{BackendStyle, emit_backend, emit_backend_tests};
use crate::docs::{emit_api_reference, emit_field_reference, emit_readme};
use crate::frontend::{emit_frontend, emit_frontend_tests};
use crate::plan::FormPlan;
use crate::sql::emit_sql_schema;
use chrono::{DateTime, Utc};
use formforge_core::{
    AssemblyReport, Category, FormStructure, GeneratedCodeBundle, GeneratedFile,
    GenerationOptions, GenerationResult, Language,
};

/// Archive path of the schema script shipped with a backend.
pub const SCHEMA_DIR: &str = "backend/sql";

/// Assemble a project, stamped with the current time.
///
/// Option fallbacks, dropped conditional rules and rule conflicts are
/// returned as warnings. Any emitter error aborts the whole assembly.
pub fn assemble(
    structure: &FormStructure,
    project_name: &str,
    options: &GenerationOptions,
) -> GenerationResult<AssemblyReport> {
    assemble_at(structure, project_name, options, Utc::now())
}

/// Assemble a project with an explicit timestamp.
pub fn assemble_at(
    structure: &FormStructure,
    project_name: &str,
    options: &GenerationOptions,
    generated_at: DateTime<Utc>,
) -> GenerationResult<AssemblyReport> {
    let (resolved, mut warnings) = options.resolve();
    let (plan, plan_warnings) = FormPlan::build(structure, project_name)?;
    warnings.extend(plan_warnings);

    let mut files = emit_frontend(&plan, &resolved)?;
    if resolved.include_tests {
        files.push(emit_frontend_tests(&plan, &resolved));
    }

    let style = resolved
        .include_backend
        .then(|| BackendStyle::from(resolved.backend_framework));
    if let Some(style) = style {
        files.push(
            GeneratedFile::new(
                "schema.sql",
                emit_sql_schema(&plan, project_name, style.sql_dialect()),
                Language::Sql,
                Category::Sql,
            )
            .at(SCHEMA_DIR),
        );
        files.extend(emit_backend(&plan, project_name, style)?);
        if resolved.include_tests {
            files.extend(emit_backend_tests(&plan, project_name, style));
        }
    }

    if resolved.include_documentation {
        files.push(emit_field_reference(&plan));
        if let Some(style) = style {
            files.push(emit_api_reference(&plan, project_name, style));
        }
    }

    let readme = emit_readme(&plan, &resolved, &files);
    files.push(readme);

    let bundle = GeneratedCodeBundle::new(plan.project.display.clone(), resolved, generated_at, files);
    tracing::info!(
        project = %bundle.project_name(),
        files = bundle.file_count(),
        warnings = warnings.len(),
        "assembled project"
    );
    Ok(AssemblyReport { bundle, warnings })
}
