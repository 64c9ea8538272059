//! Shared field-type mapping table.
//!
//! One [`TypeMapping`] row per [`FieldKind`] holds every target-language
//! type the emitters need. Emitters look types up here instead of matching
//! on the kind themselves, so adding a kind means adding one row.

use crate::model::FieldKind;

/// Target types for one abstract field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub kind: FieldKind,
    /// `type` attribute of an `<input>`; `select`/`textarea` for non-inputs.
    pub html_input: &'static str,
    /// TypeScript type in the form data interface.
    pub ts_type: &'static str,
    /// TypeScript type on an ORM entity.
    pub entity_ts_type: &'static str,
    /// Generic (Postgres) column type.
    pub sql_type: &'static str,
    /// SQL Server column type.
    pub tsql_type: &'static str,
    /// C# property type, before nullability.
    pub csharp_type: &'static str,
    /// TypeORM column type.
    pub orm_column: &'static str,
    /// Initial value literal in the generated form state.
    pub initial_value: &'static str,
}

const fn text_row(kind: FieldKind, html_input: &'static str) -> TypeMapping {
    TypeMapping {
        kind,
        html_input,
        ts_type: "string",
        entity_ts_type: "string",
        sql_type: "VARCHAR(255)",
        tsql_type: "NVARCHAR(255)",
        csharp_type: "string",
        orm_column: "varchar",
        initial_value: "''",
    }
}

static TABLE: [TypeMapping; 10] = [
    text_row(FieldKind::Text, "text"),
    text_row(FieldKind::Email, "email"),
    text_row(FieldKind::Phone, "tel"),
    TypeMapping {
        kind: FieldKind::Number,
        html_input: "number",
        ts_type: "number",
        entity_ts_type: "number",
        sql_type: "INTEGER",
        tsql_type: "INT",
        csharp_type: "int",
        orm_column: "integer",
        initial_value: "0",
    },
    TypeMapping {
        kind: FieldKind::Date,
        html_input: "date",
        ts_type: "Date | string",
        entity_ts_type: "Date",
        sql_type: "DATE",
        tsql_type: "DATE",
        csharp_type: "DateTime",
        orm_column: "date",
        initial_value: "''",
    },
    TypeMapping {
        kind: FieldKind::Checkbox,
        html_input: "checkbox",
        ts_type: "boolean",
        entity_ts_type: "boolean",
        sql_type: "BOOLEAN DEFAULT FALSE",
        tsql_type: "BIT",
        csharp_type: "bool",
        orm_column: "boolean",
        initial_value: "false",
    },
    text_row(FieldKind::Radio, "radio"),
    text_row(FieldKind::Select, "select"),
    TypeMapping {
        kind: FieldKind::MultiSelect,
        html_input: "select",
        ts_type: "string[]",
        entity_ts_type: "string[]",
        sql_type: "TEXT",
        tsql_type: "NVARCHAR(MAX)",
        csharp_type: "string",
        orm_column: "simple-array",
        initial_value: "[]",
    },
    TypeMapping {
        kind: FieldKind::Textarea,
        html_input: "textarea",
        ts_type: "string",
        entity_ts_type: "string",
        sql_type: "TEXT",
        tsql_type: "NVARCHAR(MAX)",
        csharp_type: "string",
        orm_column: "text",
        initial_value: "''",
    },
];

/// The row for a kind.
#[must_use]
pub fn mapping(kind: FieldKind) -> &'static TypeMapping {
    TABLE
        .iter()
        .find(|row| row.kind == kind)
        .unwrap_or(&TABLE[0])
}

/// The row for a raw tag, falling back to free text for unknown tags.
#[must_use]
pub fn mapping_for_tag(tag: &str) -> &'static TypeMapping {
    FieldKind::parse(tag).map_or(&TABLE[0], mapping)
}

#[must_use]
pub fn html_input_type(kind: FieldKind) -> &'static str {
    mapping(kind).html_input
}

#[must_use]
pub fn ts_type(kind: FieldKind) -> &'static str {
    mapping(kind).ts_type
}

#[must_use]
pub fn sql_type(kind: FieldKind) -> &'static str {
    mapping(kind).sql_type
}

#[must_use]
pub fn tsql_type(kind: FieldKind) -> &'static str {
    mapping(kind).tsql_type
}

#[must_use]
pub fn csharp_type(kind: FieldKind) -> &'static str {
    mapping(kind).csharp_type
}

#[must_use]
pub fn orm_column_type(kind: FieldKind) -> &'static str {
    mapping(kind).orm_column
}
