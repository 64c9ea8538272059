//! Backend API emission.
//!
//! Two styles share one contract: create, paged list, get by id, update and
//! delete over the planned fields, answering with a
//! `{ success, data | error, message }` envelope. Validation failures are
//! 400, missing records 404, unexpected failures 500, creation 201.

mod dotnet;
mod express;

use crate::plan::{FormPlan, ProjectNames};
use crate::sql::SqlDialect;
use formforge_core::{BackendFramework, GeneratedFile, GenerationResult};
use std::fmt;

/// How the generated API declares its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendStyle {
    /// Express router functions with express-validator middleware.
    RouteHandler,
    /// ASP.NET Core attribute-routed controller.
    Annotation,
}

impl BackendStyle {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RouteHandler => "route-handler",
            Self::Annotation => "annotation",
        }
    }

    /// Dialect of the schema script shipped with this backend.
    #[must_use]
    pub fn sql_dialect(&self) -> SqlDialect {
        match self {
            Self::RouteHandler => SqlDialect::Generic,
            Self::Annotation => SqlDialect::Tsql,
        }
    }
}

impl From<BackendFramework> for BackendStyle {
    fn from(framework: BackendFramework) -> Self {
        match framework {
            BackendFramework::Express
            | BackendFramework::NestJs
            | BackendFramework::FastApi
            | BackendFramework::Django => Self::RouteHandler,
            BackendFramework::AspnetCore | BackendFramework::SpringBoot => Self::Annotation,
        }
    }
}

impl fmt::Display for BackendStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emit the API project for `resource_name`.
pub fn emit_backend(
    plan: &FormPlan,
    resource_name: &str,
    style: BackendStyle,
) -> GenerationResult<Vec<GeneratedFile>> {
    let resource = ProjectNames::new(resource_name);
    let files = match style {
        BackendStyle::RouteHandler => express::emit(plan, &resource)?,
        BackendStyle::Annotation => dotnet::emit(plan, &resource),
    };
    tracing::debug!(
        resource = %resource.pascal,
        style = %style,
        files = files.len(),
        "emitted backend"
    );
    Ok(files)
}

/// Emit the API test suite: supertest for Express, xUnit for ASP.NET Core.
#[must_use]
pub fn emit_backend_tests(plan: &FormPlan, resource_name: &str, style: BackendStyle) -> Vec<GeneratedFile> {
    let resource = ProjectNames::new(resource_name);
    match style {
        BackendStyle::RouteHandler => vec![express::emit_tests(plan, &resource)],
        BackendStyle::Annotation => dotnet::emit_tests(&resource),
    }
}

/// Endpoint summary shared by the API docs: method, path, purpose, status.
pub(crate) fn endpoints(resource: &ProjectNames, style: BackendStyle) -> Vec<(&'static str, String, String, &'static str)> {
    let base = match style {
        BackendStyle::RouteHandler => format!("/api/{}", resource.kebab),
        BackendStyle::Annotation => format!("/api/{}", resource.pascal),
    };
    let name = &resource.pascal;
    vec![
        ("POST", base.clone(), format!("Create a {name}"), "201"),
        ("GET", base.clone(), format!("List {name} records, paged"), "200"),
        ("GET", format!("{base}/{{id}}"), format!("Get a {name} by id"), "200 / 404"),
        ("PUT", format!("{base}/{{id}}"), format!("Update a {name}"), "200 / 404"),
        ("DELETE", format!("{base}/{{id}}"), format!("Delete a {name}"), "200 / 404"),
    ]
}

#[cfg(test)]
mod backend_tests;
