//! Relational schema emission.
//!
//! Both dialects render from one ordered column list, so the CREATE TABLE
//! statement and every stored-procedure parameter list always line up with
//! the form's fields.

use crate::plan::{FormPlan, ProjectNames};
use formforge_core::mapping::{sql_type, tsql_type};
use std::fmt;

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    /// Postgres-flavoured SQL with a trigger function.
    #[default]
    Generic,
    /// SQL Server with stored procedures.
    Tsql,
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 2] = [Self::Generic, Self::Tsql];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Tsql => "tsql",
        }
    }

    /// Parse a dialect name (e.g., "tsql", "postgres").
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "postgres" | "postgresql" => Some(Self::Generic),
            "tsql" | "t-sql" | "sqlserver" | "sql-server" | "mssql" => Some(Self::Tsql),
            _ => None,
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words the generic dialect only accepts as quoted identifiers.
const RESERVED_WORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "between",
    "both", "by", "case", "cast", "check", "collate", "column", "constraint", "create", "cross",
    "current_date", "current_role", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "delete", "desc", "distinct", "do", "else", "end", "except",
    "false", "fetch", "for", "foreign", "from", "grant", "group", "having", "in", "index",
    "initially", "inner", "insert", "intersect", "into", "is", "join", "key", "lateral",
    "leading", "left", "like", "limit", "localtime", "localtimestamp", "natural", "not", "null",
    "offset", "on", "only", "or", "order", "outer", "primary", "references", "returning",
    "right", "select", "session_user", "set", "some", "symmetric", "table", "then", "to",
    "trailing", "true", "union", "unique", "update", "user", "using", "values", "variadic",
    "when", "where", "window", "with",
];

/// A generic-dialect identifier, double-quoted when it is a reserved word.
#[must_use]
pub fn generic_ident(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("\"{name}\"")
    } else {
        name.to_string()
    }
}

/// One field column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub sql_type: &'static str,
    pub nullable: bool,
}

impl Column {
    fn null_clause(&self) -> &'static str {
        if self.nullable { "NULL" } else { "NOT NULL" }
    }

    /// `[Name] TYPE [= NULL]` as a procedure parameter.
    fn parameter(&self) -> String {
        if self.nullable {
            format!("@{} {} = NULL", self.name, self.sql_type)
        } else {
            format!("@{} {}", self.name, self.sql_type)
        }
    }
}

/// Field columns in document order.
#[must_use]
pub fn columns(plan: &FormPlan, dialect: SqlDialect) -> Vec<Column> {
    plan.fields
        .iter()
        .map(|field| match dialect {
            SqlDialect::Generic => Column {
                name: field.column.clone(),
                sql_type: sql_type(field.kind),
                nullable: !field.required,
            },
            SqlDialect::Tsql => Column {
                name: field.pascal.clone(),
                sql_type: tsql_type(field.kind),
                nullable: !field.required,
            },
        })
        .collect()
}

/// The complete schema script for `table_name`.
///
/// Generic table names are snake_case; SQL Server names are PascalCase.
/// The script carries no timestamp, so the same plan always yields the
/// same text.
#[must_use]
pub fn emit_sql_schema(plan: &FormPlan, table_name: &str, dialect: SqlDialect) -> String {
    let names = ProjectNames::new(table_name);
    let columns = columns(plan, dialect);
    let sql = match dialect {
        SqlDialect::Generic => generic_schema(&names.snake, &columns),
        SqlDialect::Tsql => tsql_schema(&names.pascal, &columns),
    };
    tracing::debug!(table = %table_name, dialect = %dialect, columns = columns.len(), "emitted sql schema");
    sql
}

fn generic_schema(name: &str, columns: &[Column]) -> String {
    let table = generic_ident(name);
    let mut lines = vec!["id SERIAL PRIMARY KEY".to_string()];
    lines.extend(
        columns
            .iter()
            .map(|c| format!("{} {} {}", generic_ident(&c.name), c.sql_type, c.null_clause())),
    );
    lines.extend(
        [
            "created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
            "updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
            "created_by VARCHAR(255)",
            "updated_by VARCHAR(255)",
        ]
        .map(str::to_string),
    );

    let mut sql = String::new();
    sql.push_str(&format!("-- Auto-generated SQL schema for {name}\n\n"));
    sql.push_str(&format!("CREATE TABLE {table} (\n"));
    sql.push_str(&join_indented(&lines, "  ", ",\n"));
    sql.push_str("\n);\n\n");

    sql.push_str("-- Indexes\n");
    sql.push_str(&format!(
        "CREATE INDEX idx_{name}_created_at ON {table}(created_at);\n\n"
    ));

    sql.push_str("-- Keep updated_at current\n");
    sql.push_str(&format!("CREATE OR REPLACE FUNCTION update_{name}_updated_at()\n"));
    sql.push_str("RETURNS TRIGGER AS $$\n");
    sql.push_str("BEGIN\n");
    sql.push_str("  NEW.updated_at = CURRENT_TIMESTAMP;\n");
    sql.push_str("  RETURN NEW;\n");
    sql.push_str("END;\n");
    sql.push_str("$$ LANGUAGE plpgsql;\n\n");
    sql.push_str(&format!("CREATE TRIGGER trigger_{name}_updated_at\n"));
    sql.push_str(&format!("  BEFORE UPDATE ON {table}\n"));
    sql.push_str("  FOR EACH ROW\n");
    sql.push_str(&format!("  EXECUTE FUNCTION update_{name}_updated_at();\n"));
    sql
}

fn join_indented(lines: &[String], indent: &str, separator: &str) -> String {
    lines
        .iter()
        .map(|l| format!("{indent}{l}"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn tsql_schema(table: &str, columns: &[Column]) -> String {
    let qualified = format!("[dbo].[{table}]");

    let mut definitions = vec!["[Id] INT IDENTITY(1,1) PRIMARY KEY".to_string()];
    definitions.extend(
        columns
            .iter()
            .map(|c| format!("[{}] {} {}", c.name, c.sql_type, c.null_clause())),
    );
    definitions.extend(
        [
            "[CreatedAt] DATETIME2 NOT NULL DEFAULT GETDATE()",
            "[UpdatedAt] DATETIME2 NOT NULL DEFAULT GETDATE()",
            "[CreatedBy] NVARCHAR(255) NULL",
            "[UpdatedBy] NVARCHAR(255) NULL",
            "[IsDeleted] BIT NOT NULL DEFAULT 0",
        ]
        .map(str::to_string),
    );

    let mut sql = String::new();
    sql.push_str(&format!("-- Auto-generated SQL Server schema for {table}\n\n"));
    sql.push_str(&format!("CREATE TABLE {qualified} (\n"));
    sql.push_str(&join_indented(&definitions, "    ", ",\n"));
    sql.push_str("\n);\n\n");

    sql.push_str("-- Indexes\n");
    sql.push_str(&format!("CREATE NONCLUSTERED INDEX [IX_{table}_CreatedAt]\n"));
    sql.push_str(&format!("    ON {qualified} ([CreatedAt] DESC);\n\n"));
    sql.push_str(&format!("CREATE NONCLUSTERED INDEX [IX_{table}_IsDeleted]\n"));
    sql.push_str(&format!("    ON {qualified} ([IsDeleted]);\n"));
    sql.push_str("GO\n\n");

    sql.push_str(&update_trigger(table, &qualified));
    sql.push_str(&insert_procedure(table, &qualified, columns));
    sql.push_str(&update_procedure(table, &qualified, columns));
    sql.push_str(&get_by_id_procedure(table, &qualified));
    sql.push_str(&get_all_procedure(table, &qualified));
    sql.push_str(&delete_procedure(table, &qualified));
    sql
}

fn update_trigger(table: &str, qualified: &str) -> String {
    let mut sql = String::new();
    sql.push_str(&format!("CREATE TRIGGER [dbo].[TR_{table}_UpdatedAt]\n"));
    sql.push_str(&format!("ON {qualified}\n"));
    sql.push_str("AFTER UPDATE\n");
    sql.push_str("AS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n");
    sql.push_str(&format!("    UPDATE {qualified}\n"));
    sql.push_str("    SET [UpdatedAt] = GETDATE()\n");
    sql.push_str(&format!("    FROM {qualified} t\n"));
    sql.push_str("    INNER JOIN inserted i ON t.[Id] = i.[Id];\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n\n");
    sql
}

fn insert_procedure(table: &str, qualified: &str, columns: &[Column]) -> String {
    let mut parameters: Vec<String> = columns.iter().map(Column::parameter).collect();
    parameters.push("@CreatedBy NVARCHAR(255) = NULL".to_string());

    let mut targets: Vec<String> = columns.iter().map(|c| format!("[{}]", c.name)).collect();
    targets.push("[CreatedBy]".to_string());

    let mut values: Vec<String> = columns.iter().map(|c| format!("@{}", c.name)).collect();
    values.push("@CreatedBy".to_string());

    let mut sql = String::new();
    sql.push_str(&format!("CREATE PROCEDURE [dbo].[sp_Insert{table}]\n"));
    sql.push_str(&join_indented(&parameters, "    ", ",\n"));
    sql.push_str("\nAS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n\n");
    sql.push_str(&format!("    INSERT INTO {qualified} (\n"));
    sql.push_str(&join_indented(&targets, "        ", ",\n"));
    sql.push_str("\n    )\n");
    sql.push_str("    VALUES (\n");
    sql.push_str(&join_indented(&values, "        ", ",\n"));
    sql.push_str("\n    );\n\n");
    sql.push_str("    SELECT CAST(SCOPE_IDENTITY() AS INT) AS Id;\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n\n");
    sql
}

fn update_procedure(table: &str, qualified: &str, columns: &[Column]) -> String {
    let mut parameters = vec!["@Id INT".to_string()];
    parameters.extend(columns.iter().map(Column::parameter));
    parameters.push("@UpdatedBy NVARCHAR(255) = NULL".to_string());

    let mut assignments: Vec<String> = columns
        .iter()
        .map(|c| format!("[{0}] = @{0}", c.name))
        .collect();
    assignments.push("[UpdatedBy] = @UpdatedBy".to_string());
    assignments.push("[UpdatedAt] = GETDATE()".to_string());

    let mut sql = String::new();
    sql.push_str(&format!("CREATE PROCEDURE [dbo].[sp_Update{table}]\n"));
    sql.push_str(&join_indented(&parameters, "    ", ",\n"));
    sql.push_str("\nAS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n\n");
    sql.push_str(&format!("    UPDATE {qualified}\n"));
    sql.push_str("    SET\n");
    sql.push_str(&join_indented(&assignments, "        ", ",\n"));
    sql.push_str("\n    WHERE [Id] = @Id AND [IsDeleted] = 0;\n\n");
    sql.push_str("    SELECT @@ROWCOUNT AS RowsAffected;\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n\n");
    sql
}

fn get_by_id_procedure(table: &str, qualified: &str) -> String {
    let mut sql = String::new();
    sql.push_str(&format!("CREATE PROCEDURE [dbo].[sp_Get{table}ById]\n"));
    sql.push_str("    @Id INT\n");
    sql.push_str("AS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n\n");
    sql.push_str("    SELECT *\n");
    sql.push_str(&format!("    FROM {qualified}\n"));
    sql.push_str("    WHERE [Id] = @Id AND [IsDeleted] = 0;\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n\n");
    sql
}

fn get_all_procedure(table: &str, qualified: &str) -> String {
    let mut sql = String::new();
    sql.push_str(&format!("CREATE PROCEDURE [dbo].[sp_GetAll{table}]\n"));
    sql.push_str("    @PageNumber INT = 1,\n");
    sql.push_str("    @PageSize INT = 10\n");
    sql.push_str("AS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n\n");
    sql.push_str("    SELECT *\n");
    sql.push_str(&format!("    FROM {qualified}\n"));
    sql.push_str("    WHERE [IsDeleted] = 0\n");
    sql.push_str("    ORDER BY [CreatedAt] DESC\n");
    sql.push_str("    OFFSET (@PageNumber - 1) * @PageSize ROWS\n");
    sql.push_str("    FETCH NEXT @PageSize ROWS ONLY;\n\n");
    sql.push_str("    SELECT COUNT(*) AS TotalCount\n");
    sql.push_str(&format!("    FROM {qualified}\n"));
    sql.push_str("    WHERE [IsDeleted] = 0;\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n\n");
    sql
}

fn delete_procedure(table: &str, qualified: &str) -> String {
    let mut sql = String::new();
    sql.push_str(&format!("CREATE PROCEDURE [dbo].[sp_Delete{table}]\n"));
    sql.push_str("    @Id INT,\n");
    sql.push_str("    @DeletedBy NVARCHAR(255) = NULL\n");
    sql.push_str("AS\n");
    sql.push_str("BEGIN\n");
    sql.push_str("    SET NOCOUNT ON;\n\n");
    sql.push_str(&format!("    UPDATE {qualified}\n"));
    sql.push_str("    SET [IsDeleted] = 1,\n");
    sql.push_str("        [UpdatedBy] = @DeletedBy,\n");
    sql.push_str("        [UpdatedAt] = GETDATE()\n");
    sql.push_str("    WHERE [Id] = @Id AND [IsDeleted] = 0;\n\n");
    sql.push_str("    SELECT @@ROWCOUNT AS RowsAffected;\n");
    sql.push_str("END;\n");
    sql.push_str("GO\n");
    sql
}

#[cfg(test)]
#[path = "sql/sql_tests.rs"]
mod sql_tests;
