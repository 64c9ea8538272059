//! Markdown documentation: the project README and the reference pages.

use crate::backend::{BackendStyle, endpoints};
use crate::plan::{FormPlan, PlannedField, ProjectNames};
use formforge_core::{
    Category, ConditionOperator, GeneratedFile, GenerationOptions, Language, Visibility,
};

fn markdown(name: &str, content: String, dir: &str) -> GeneratedFile {
    GeneratedFile::new(name, content, Language::Markdown, Category::Docs).at(dir)
}

/// Table cells cannot hold pipes or line breaks.
fn cell(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// `README.md` at the archive root, listing every other file.
///
/// Contains no date, so regenerating the same form yields the same text.
#[must_use]
pub fn emit_readme(plan: &FormPlan, options: &GenerationOptions, files: &[GeneratedFile]) -> GeneratedFile {
    let mut md = String::new();
    md.push_str(&format!("# {} Form\n\n", plan.project.pascal));
    if let Some(title) = plan.title.as_deref().filter(|t| !t.trim().is_empty()) {
        md.push_str(&format!("{}\n\n", cell(title)));
    }
    md.push_str(&format!(
        "Generated code for **{}**: {} field(s).\n\n",
        cell(&plan.project.display),
        plan.fields.len()
    ));

    md.push_str("## Stack\n\n");
    md.push_str(&format!("- Frontend: {}\n", options.template));
    md.push_str(&format!("- Form library: {}\n", options.form_library));
    md.push_str(&format!("- Validation: {}\n", options.validation_library));
    md.push_str(&format!("- Styling: {}\n", options.styling));
    if options.include_backend {
        md.push_str(&format!("- Backend: {}\n", options.backend_framework));
    }
    md.push('\n');

    md.push_str("## Getting started\n\n");
    md.push_str("```bash\ncd frontend\nnpm install\nnpm start\n```\n\n");
    if options.include_backend {
        match BackendStyle::from(options.backend_framework) {
            BackendStyle::RouteHandler => {
                md.push_str("Create the table with `backend/sql/schema.sql`, then start the API:\n\n");
                md.push_str("```bash\ncd backend\nnpm install\nnpm run dev\n```\n\n");
            }
            BackendStyle::Annotation => {
                md.push_str("Run `backend/sql/schema.sql` against SQL Server, set the `DefaultConnection` connection string, then start the API:\n\n");
                md.push_str(&format!(
                    "```bash\ncd backend/{}Api\ndotnet run\n```\n\n",
                    plan.project.pascal
                ));
            }
        }
    }
    if options.include_tests {
        md.push_str("Run the tests with `npm test` in each JavaScript project");
        if options.include_backend && BackendStyle::from(options.backend_framework) == BackendStyle::Annotation {
            md.push_str(" and `dotnet test` under `backend/tests`");
        }
        md.push_str(".\n\n");
    }

    md.push_str("## Files\n");
    for category in Category::ALL {
        let mut listed = files.iter().filter(|f| f.category() == category).peekable();
        if listed.peek().is_none() {
            continue;
        }
        md.push_str(&format!("\n### {category}\n\n"));
        for file in listed {
            md.push_str(&format!("- `{}`\n", file.archive_path()));
        }
    }

    markdown("README.md", md.replace("\n\n\n", "\n\n"), "")
}

fn rule_summary(field: &PlannedField) -> String {
    let mut parts = Vec::new();
    for rule in &field.rules {
        match &rule.value {
            Some(value) => parts.push(format!("{} {}", rule.kind, value)),
            None => parts.push(rule.kind.to_string()),
        }
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        cell(&parts.join(", "))
    }
}

fn visibility_summary(plan: &FormPlan, field: &PlannedField) -> String {
    let Some(condition) = &field.condition else {
        return "always".to_string();
    };
    let source = plan
        .fields
        .iter()
        .find(|f| f.ident == condition.source_ident)
        .map_or(condition.source_ident.as_str(), |f| f.label.as_str());
    let verb = match condition.action {
        Visibility::Show => "shown",
        Visibility::Hide => "hidden",
    };
    let operator = match condition.operator {
        ConditionOperator::Equals => "equals",
        ConditionOperator::NotEquals => "does not equal",
        ConditionOperator::Contains => "contains",
        ConditionOperator::GreaterThan => "is greater than",
        ConditionOperator::LessThan => "is less than",
    };
    cell(&format!("{verb} when {source} {operator} {}", condition.value))
}

/// `docs/FIELDS.md`: one row per field with its identifiers and rules.
#[must_use]
pub fn emit_field_reference(plan: &FormPlan) -> GeneratedFile {
    let mut md = String::new();
    md.push_str(&format!("# {} fields\n\n", plan.project.pascal));
    if plan.fields.is_empty() {
        md.push_str("This form has no fields.\n");
        return markdown("FIELDS.md", md, "docs");
    }

    md.push_str("| # | Label | Property | Column | Type | Required | Rules | Visibility |\n");
    md.push_str("|---|-------|----------|--------|------|----------|-------|------------|\n");
    for (i, field) in plan.fields.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | `{}` | `{}` | {} | {} | {} | {} |\n",
            i + 1,
            cell(&field.label),
            field.ident,
            field.column,
            field.kind,
            if field.required { "yes" } else { "no" },
            rule_summary(field),
            visibility_summary(plan, field)
        ));
    }

    let with_options: Vec<&PlannedField> = plan.fields.iter().filter(|f| !f.options.is_empty()).collect();
    if !with_options.is_empty() {
        md.push_str("\n## Options\n");
        for field in with_options {
            md.push_str(&format!("\n### {}\n\n", cell(&field.label)));
            for option in &field.options {
                md.push_str(&format!("- `{}`: {}\n", option.value, cell(&option.label)));
            }
        }
    }
    markdown("FIELDS.md", md, "docs")
}

/// `docs/API.md`: endpoints and the response envelope.
#[must_use]
pub fn emit_api_reference(plan: &FormPlan, resource_name: &str, style: BackendStyle) -> GeneratedFile {
    let resource = ProjectNames::new(resource_name);

    let mut md = String::new();
    md.push_str(&format!("# {} API\n\n", resource.pascal));
    md.push_str("| Method | Path | Description | Status |\n");
    md.push_str("|--------|------|-------------|--------|\n");
    for (method, path, description, status) in endpoints(&resource, style) {
        md.push_str(&format!("| {method} | `{path}` | {description} | {status} |\n"));
    }

    md.push_str("\n## Responses\n\n");
    md.push_str("Every response uses one envelope:\n\n");
    md.push_str("```json\n{ \"success\": true, \"data\": {}, \"message\": \"...\" }\n```\n\n");
    md.push_str("Failures set `success` to `false` and carry `error` instead of `data`.\n\n");
    md.push_str("| Status | Meaning |\n|--------|---------|\n");
    md.push_str("| 201 | Record created |\n");
    md.push_str("| 400 | Validation failed |\n");
    md.push_str("| 404 | Record not found |\n");
    md.push_str("| 500 | Unexpected failure |\n");

    let pagination = match style {
        BackendStyle::RouteHandler => "`page` and `limit` (default 10)",
        BackendStyle::Annotation => "`pageNumber` and `pageSize` (default 10)",
    };
    md.push_str(&format!("\nThe list endpoint pages with {pagination}.\n"));

    if !plan.fields.is_empty() {
        md.push_str("\n## Body\n\n");
        let required: Vec<&str> = plan
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.ident.as_str())
            .collect();
        let properties: Vec<String> = plan.fields.iter().map(|f| format!("`{}`", f.ident)).collect();
        md.push_str(&format!("Properties: {}.\n", properties.join(", ")));
        if !required.is_empty() {
            let required: Vec<String> = required.iter().map(|r| format!("`{r}`")).collect();
            md.push_str(&format!("Required: {}.\n", required.join(", ")));
        }
    }
    markdown("API.md", md, "docs")
}
