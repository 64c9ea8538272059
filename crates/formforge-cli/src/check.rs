//! `check`: validate a form definition without generating anything.

use crate::input::{InputFormat, load_form};
use anyhow::{Context, Result};
use formforge_codegen::FormPlan;

/// Plan the form and report identifiers and warnings.
pub fn run(form: &str, format: InputFormat) -> Result<()> {
    let structure = load_form(form, format)?;
    let title = structure.title.clone().unwrap_or_default();
    let (plan, warnings) = FormPlan::build(&structure, &title).context("Form is invalid")?;

    println!("{}: {} fields", plan.project.display, plan.fields.len());
    for field in &plan.fields {
        println!(
            "  {:<12} {:<14} {} / {}{}",
            field.id,
            field.kind.as_str(),
            field.ident,
            field.column,
            if field.required { " (required)" } else { "" }
        );
    }

    if warnings.is_empty() {
        println!("OK");
    } else {
        println!("{} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
