#![allow(non_snake_case)]

use super::*;
use formforge_core::{FieldDescriptor, FieldKind, FormStructure};
use test_case::test_case;

fn plan_of(fields: Vec<FieldDescriptor>) -> FormPlan {
    let structure = fields
        .into_iter()
        .fold(FormStructure::new("T"), FormStructure::with_field);
    FormPlan::build(&structure, "Demo").unwrap().0
}

fn applicants() -> FormPlan {
    plan_of(vec![
        FieldDescriptor::new("e", "Email", FieldKind::Email).required(),
        FieldDescriptor::new("a", "Age", FieldKind::Number),
    ])
}

/// Lines between `start` and the next line equal to `end`.
fn block<'a>(sql: &'a str, start: &str, end: &str) -> Vec<&'a str> {
    sql.lines()
        .skip_while(|l| !l.starts_with(start))
        .skip(1)
        .take_while(|l| *l != end)
        .map(|l| l.trim().trim_end_matches(','))
        .collect()
}

#[test_case("tsql", Some(SqlDialect::Tsql))]
#[test_case("T-SQL", Some(SqlDialect::Tsql))]
#[test_case("postgres", Some(SqlDialect::Generic))]
#[test_case("generic", Some(SqlDialect::Generic))]
#[test_case("oracle", None)]
fn SqlDialect_parse___accepts_known_names(input: &str, expected: Option<SqlDialect>) {
    assert_eq!(SqlDialect::parse(input), expected);
}

#[test]
fn emit_sql_schema___tsql___renders_typed_columns() {
    let sql = emit_sql_schema(&applicants(), "Applicants", SqlDialect::Tsql);

    assert!(sql.contains("CREATE TABLE [dbo].[Applicants] ("));
    assert!(sql.contains("    [Id] INT IDENTITY(1,1) PRIMARY KEY,\n"));
    assert!(sql.contains("    [Email] NVARCHAR(255) NOT NULL,\n"));
    assert!(sql.contains("    [Age] INT NULL,\n"));
    assert!(sql.contains("    [IsDeleted] BIT NOT NULL DEFAULT 0\n);"));
}

#[test]
fn emit_sql_schema___tsql___emits_every_procedure() {
    let sql = emit_sql_schema(&applicants(), "Applicants", SqlDialect::Tsql);

    for name in [
        "sp_InsertApplicants",
        "sp_UpdateApplicants",
        "sp_GetApplicantsById",
        "sp_GetAllApplicants",
        "sp_DeleteApplicants",
    ] {
        assert!(sql.contains(&format!("CREATE PROCEDURE [dbo].[{name}]")), "{name}");
    }
    assert!(sql.contains("    @PageSize INT = 10\n"));
    assert!(sql.contains("FETCH NEXT @PageSize ROWS ONLY;"));
    assert!(sql.contains("SET [IsDeleted] = 1,"));
    assert!(sql.contains("CREATE TRIGGER [dbo].[TR_Applicants_UpdatedAt]"));
}

#[test]
fn emit_sql_schema___tsql___insert_parameters_follow_table_columns() {
    let sql = emit_sql_schema(&applicants(), "Applicants", SqlDialect::Tsql);

    let params = block(&sql, "CREATE PROCEDURE [dbo].[sp_InsertApplicants]", "AS");

    assert_eq!(
        params,
        vec![
            "@Email NVARCHAR(255)",
            "@Age INT = NULL",
            "@CreatedBy NVARCHAR(255) = NULL",
        ]
    );
}

#[test]
fn emit_sql_schema___tsql_update___assigns_each_column() {
    let sql = emit_sql_schema(&applicants(), "Applicants", SqlDialect::Tsql);

    assert!(sql.contains("        [Email] = @Email,\n        [Age] = @Age,\n"));
    assert!(sql.contains("    @Id INT,\n    @Email NVARCHAR(255),\n"));
}

#[test]
fn emit_sql_schema___generic___uses_snake_case_names() {
    let plan = plan_of(vec![
        FieldDescriptor::new("f", "First Name", FieldKind::Text).required(),
        FieldDescriptor::new("n", "Newsletter", FieldKind::Checkbox),
    ]);

    let sql = emit_sql_schema(&plan, "Customer Intake", SqlDialect::Generic);

    assert!(sql.contains("CREATE TABLE customer_intake (\n  id SERIAL PRIMARY KEY,\n"));
    assert!(sql.contains("  first_name VARCHAR(255) NOT NULL,\n"));
    assert!(sql.contains("  newsletter BOOLEAN DEFAULT FALSE NULL,\n"));
    assert!(sql.contains("CREATE INDEX idx_customer_intake_created_at ON customer_intake(created_at);"));
    assert!(sql.contains("EXECUTE FUNCTION update_customer_intake_updated_at();"));
}

#[test_case(SqlDialect::Generic; "generic")]
#[test_case(SqlDialect::Tsql; "tsql")]
fn emit_sql_schema___no_fields___is_well_formed(dialect: SqlDialect) {
    let sql = emit_sql_schema(&plan_of(Vec::new()), "Empty", dialect);

    assert!(!sql.contains(",,"));
    assert!(!sql.contains("(\n,"));
    assert!(!sql.contains("(\n    ,"));
    assert!(sql.contains("CREATE TABLE"));
}

#[test]
fn emit_sql_schema___tsql_no_fields___insert_keeps_created_by_only() {
    let sql = emit_sql_schema(&plan_of(Vec::new()), "Empty", SqlDialect::Tsql);

    let params = block(&sql, "CREATE PROCEDURE [dbo].[sp_InsertEmpty]", "AS");

    assert_eq!(params, vec!["@CreatedBy NVARCHAR(255) = NULL"]);
}

#[test]
fn emit_sql_schema___same_plan___same_text() {
    let plan = applicants();

    assert_eq!(
        emit_sql_schema(&plan, "Applicants", SqlDialect::Tsql),
        emit_sql_schema(&plan, "Applicants", SqlDialect::Tsql)
    );
}

#[test]
fn columns___reserved_label___does_not_collide_with_audit_columns() {
    let plan = plan_of(vec![FieldDescriptor::new("c", "Created At", FieldKind::Date)]);

    let generic = columns(&plan, SqlDialect::Generic);
    let tsql = columns(&plan, SqlDialect::Tsql);

    assert_eq!(generic[0].name, "created_at2");
    assert_eq!(tsql[0].name, "CreatedAt2");
}

#[test]
fn emit_sql_schema___generic_reserved_words___are_quoted() {
    let plan = plan_of(vec![
        FieldDescriptor::new("o", "Order", FieldKind::Number).required(),
        FieldDescriptor::new("g", "Group", FieldKind::Text),
        FieldDescriptor::new("n", "Notes", FieldKind::Textarea),
    ]);

    let sql = emit_sql_schema(&plan, "User", SqlDialect::Generic);

    assert!(sql.contains("CREATE TABLE \"user\" (\n"));
    assert!(sql.contains("  \"order\" INTEGER NOT NULL,\n"));
    assert!(sql.contains("  \"group\" VARCHAR(255) NULL,\n"));
    assert!(sql.contains("  notes TEXT NULL,\n"));
    assert!(sql.contains("CREATE INDEX idx_user_created_at ON \"user\"(created_at);"));
    assert!(sql.contains("  BEFORE UPDATE ON \"user\"\n"));
    assert!(!sql.contains(" ON user"));
}

#[test_case("order", "\"order\""; "reserved")]
#[test_case("user", "\"user\""; "reserved table name")]
#[test_case("order_total", "order_total"; "compound name")]
fn generic_ident___quotes_only_reserved_words(name: &str, expected: &str) {
    assert_eq!(generic_ident(name), expected);
}
