//! `sql`: print the schema script for a form.

use crate::input::{InputFormat, load_form};
use anyhow::{Context, Result};
use formforge_codegen::{FormPlan, SqlDialect, emit_sql_schema};

pub fn run(form: &str, format: InputFormat, table: &str, dialect: &str) -> Result<()> {
    let dialect = SqlDialect::parse(dialect).with_context(|| {
        let known: Vec<&str> = SqlDialect::ALL.iter().map(SqlDialect::as_str).collect();
        format!("Unknown SQL dialect '{dialect}' (expected one of: {})", known.join(", "))
    })?;

    let structure = load_form(form, format)?;
    let (plan, _) = FormPlan::build(&structure, table).context("Form is invalid")?;

    print!("{}", emit_sql_schema(&plan, table, dialect));
    Ok(())
}
