//! Validation-schema emission for Yup, Zod, Joi, and class-validator.
//!
//! Every field becomes one [`SchemaEntry`]: a base constructor for the
//! library, one chained constraint per applicable rule, and a terminal that
//! carries the required/optional decision. Required fields get exactly one
//! required terminal, whatever the library. A required multi-select must
//! hold at least one value and a required checkbox must be ticked.
//!
//! A required field with a visibility condition is only required while it
//! is visible, so the schema never blocks a form on a hidden field.

use crate::plan::{FormPlan, PlannedField};
use crate::text::{js_regex, js_str, one_line};
use formforge_core::mapping::ts_type;
use formforge_core::{FieldKind, RuleKind, ValidationLibrary, ValidationRule};
use std::collections::BTreeSet;

/// Digits-only phone format used by every generated validator.
pub(crate) const PHONE_PATTERN: &str = "^[0-9]{10}$";

/// Name of the class holding class-validator decorators.
pub(crate) const CLASS_NAME: &str = "FormValues";

/// One field of a validation schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub ident: String,
    /// Base constructor, or the type decorator for class-validator.
    pub base: String,
    /// Chained constraints, or extra decorators for class-validator.
    pub constraints: Vec<String>,
    /// Required/optional marker, if the library needs one.
    pub terminal: Option<String>,
    /// Rules with no library equivalent, rendered as comments.
    pub notes: Vec<String>,
    /// TypeScript property declaration for class-validator.
    property: String,
}

impl SchemaEntry {
    /// Render as an object-literal property or a decorated class member.
    #[must_use]
    pub fn render(&self, library: ValidationLibrary) -> String {
        let mut code = String::new();
        for note in &self.notes {
            code.push_str(&format!("  // {note}\n"));
        }

        if library == ValidationLibrary::ClassValidator {
            if let Some(terminal) = &self.terminal {
                code.push_str(&format!("  {terminal}\n"));
            }
            code.push_str(&format!("  {}\n", self.base));
            for decorator in &self.constraints {
                code.push_str(&format!("  {decorator}\n"));
            }
            code.push_str(&format!("  {}\n", self.property));
        } else {
            code.push_str(&format!(
                "  {}: {}{}{},\n",
                self.ident,
                self.base,
                self.constraints.concat(),
                self.terminal.as_deref().unwrap_or("")
            ));
        }
        code
    }

    /// Decorator names used by a class-validator entry.
    fn decorators(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.base)
            .chain(&self.constraints)
            .chain(&self.terminal)
            .filter_map(|d| d.strip_prefix('@'))
            .filter_map(|d| d.split('(').next())
    }
}

/// Format check implied by the kind or requested by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Email,
    Phone,
}

pub(crate) fn format_check(field: &PlannedField) -> Option<(Format, String)> {
    let (format, kind, default) = match field.kind {
        FieldKind::Email => (Format::Email, RuleKind::Email, "Invalid email address"),
        FieldKind::Phone => (Format::Phone, RuleKind::Phone, "Invalid phone number"),
        _ if field.rule(RuleKind::Email).is_some() && field.kind.is_textual() => {
            (Format::Email, RuleKind::Email, "Invalid email address")
        }
        _ if field.rule(RuleKind::Phone).is_some() && field.kind.is_textual() => {
            (Format::Phone, RuleKind::Phone, "Invalid phone number")
        }
        _ => return None,
    };
    let message = field
        .rule(kind)
        .and_then(ValidationRule::message)
        .unwrap_or(default)
        .to_string();
    Some((format, message))
}

fn rule_message(rule: &ValidationRule, default: String) -> String {
    rule.message().map(str::to_string).unwrap_or(default)
}

/// A rule reduced to what the libraries can express.
pub(crate) enum Constraint {
    MinLength(usize, String),
    MaxLength(usize, String),
    Pattern(String, String),
    Min(String, String),
    Max(String, String),
}

pub(crate) fn constraints(field: &PlannedField) -> (Vec<Constraint>, Vec<String>) {
    let mut out = Vec::new();
    let mut notes = Vec::new();
    let label = &field.label;

    for rule in &field.rules {
        let value = rule.value.as_ref();
        match rule.kind {
            RuleKind::MinLength if field.kind.is_textual() => {
                if let Some(n) = value.and_then(|v| v.as_usize()) {
                    let message = rule_message(rule, format!("{label} must be at least {n} characters"));
                    out.push(Constraint::MinLength(n, message));
                }
            }
            RuleKind::MaxLength if field.kind.is_textual() => {
                if let Some(n) = value.and_then(|v| v.as_usize()) {
                    let message = rule_message(rule, format!("{label} must be at most {n} characters"));
                    out.push(Constraint::MaxLength(n, message));
                }
            }
            RuleKind::Pattern if field.kind.is_textual() => {
                if let Some(pattern) = value.map(ToString::to_string).filter(|p| !p.is_empty()) {
                    let message = rule_message(rule, format!("{label} is invalid"));
                    out.push(Constraint::Pattern(pattern, message));
                }
            }
            RuleKind::Min if field.kind.is_numeric() => {
                if let Some(v) = value.filter(|v| v.as_f64().is_some()) {
                    let message = rule_message(rule, format!("Must be at least {v}"));
                    out.push(Constraint::Min(v.to_string(), message));
                }
            }
            RuleKind::Max if field.kind.is_numeric() => {
                if let Some(v) = value.filter(|v| v.as_f64().is_some()) {
                    let message = rule_message(rule, format!("Must not exceed {v}"));
                    out.push(Constraint::Max(v.to_string(), message));
                }
            }
            RuleKind::Custom => {
                let text = rule
                    .message()
                    .map(str::to_string)
                    .or_else(|| value.map(ToString::to_string))
                    .unwrap_or_default();
                notes.push(one_line(&format!("custom rule: {text}")));
            }
            // Format rules are folded into the base check; the rest do not
            // apply to this kind.
            _ => {
                tracing::trace!(field_id = %field.id, rule = %rule.kind, "rule not applicable");
            }
        }
    }
    (out, notes)
}

/// Build the schema entry for one field.
#[must_use]
pub fn schema_entry(field: &PlannedField, library: ValidationLibrary) -> SchemaEntry {
    match library {
        ValidationLibrary::Yup => yup_entry(field),
        ValidationLibrary::Zod => zod_entry(field),
        ValidationLibrary::Joi => joi_entry(field),
        ValidationLibrary::ClassValidator => class_validator_entry(field),
    }
}

fn entry(field: &PlannedField, base: String, constraints: Vec<String>, terminal: Option<String>, notes: Vec<String>) -> SchemaEntry {
    SchemaEntry {
        ident: field.ident.clone(),
        base,
        constraints,
        terminal,
        notes,
        property: String::new(),
    }
}

fn yup_entry(field: &PlannedField) -> SchemaEntry {
    let base = match field.kind {
        FieldKind::Number => "Yup.number()",
        FieldKind::Date => "Yup.date()",
        FieldKind::Checkbox => "Yup.boolean()",
        FieldKind::MultiSelect => "Yup.array().of(Yup.string())",
        _ => "Yup.string()",
    };
    let mut chain = Vec::new();
    match format_check(field) {
        Some((Format::Email, m)) => chain.push(format!(".email({})", js_str(&m))),
        Some((Format::Phone, m)) => chain.push(format!(".matches({}, {})", js_regex(PHONE_PATTERN), js_str(&m))),
        None => {}
    }
    let (rules, notes) = constraints(field);
    for c in rules {
        chain.push(match c {
            Constraint::MinLength(n, m) => format!(".min({n}, {})", js_str(&m)),
            Constraint::MaxLength(n, m) => format!(".max({n}, {})", js_str(&m)),
            Constraint::Pattern(p, m) => format!(".matches({}, {})", js_regex(&p), js_str(&m)),
            Constraint::Min(v, m) => format!(".min({v}, {})", js_str(&m)),
            Constraint::Max(v, m) => format!(".max({v}, {})", js_str(&m)),
        });
    }
    let required = field.required.then(|| {
        let message = js_str(&field.required_message());
        let filled = match field.kind {
            FieldKind::MultiSelect => format!(".min(1, {message})"),
            FieldKind::Checkbox => format!(".oneOf([true], {message})"),
            _ => String::new(),
        };
        format!("{filled}.required({message})")
    });
    let terminal = match (required, &field.condition) {
        (Some(required), Some(condition)) => Some(format!(
            ".when({}, {{ is: (v) => {}, then: (s) => s{required}, otherwise: (s) => s.notRequired() }})",
            js_str(&condition.source_ident),
            condition.js_test("v")
        )),
        (required, _) => required,
    };
    entry(field, base.to_string(), chain, terminal, notes)
}

fn zod_entry(field: &PlannedField) -> SchemaEntry {
    // Conditionally required fields are checked by an object refinement.
    let required = field.required && field.condition.is_none();
    let required_error = required
        .then(|| format!("{{ required_error: {} }}", js_str(&field.required_message())))
        .unwrap_or_default();
    let textual = field.kind.is_textual();
    let base = match field.kind {
        FieldKind::Number => format!("z.coerce.number({required_error})"),
        FieldKind::Date => format!("z.coerce.date({required_error})"),
        FieldKind::Checkbox => format!("z.boolean({required_error})"),
        FieldKind::MultiSelect if required_error.is_empty() => "z.array(z.string())".to_string(),
        FieldKind::MultiSelect => format!("z.array(z.string(), {required_error})"),
        _ => "z.string()".to_string(),
    };
    let mut chain = Vec::new();
    match format_check(field) {
        Some((Format::Email, m)) => chain.push(format!(".email({})", js_str(&m))),
        Some((Format::Phone, m)) => chain.push(format!(".regex({}, {})", js_regex(PHONE_PATTERN), js_str(&m))),
        None => {}
    }
    let (rules, notes) = constraints(field);
    for c in rules {
        chain.push(match c {
            Constraint::MinLength(n, m) => format!(".min({n}, {})", js_str(&m)),
            Constraint::MaxLength(n, m) => format!(".max({n}, {})", js_str(&m)),
            Constraint::Pattern(p, m) => format!(".regex({}, {})", js_regex(&p), js_str(&m)),
            Constraint::Min(v, m) => format!(".min({v}, {})", js_str(&m)),
            Constraint::Max(v, m) => format!(".max({v}, {})", js_str(&m)),
        });
    }
    let message = js_str(&field.required_message());
    let terminal = match (required, field.kind) {
        (true, FieldKind::MultiSelect) => Some(format!(".nonempty({{ message: {message} }})")),
        (true, FieldKind::Checkbox) => Some(format!(".refine((v) => v === true, {{ message: {message} }})")),
        (true, _) if textual => Some(format!(".min(1, {message})")),
        (true, _) => None,
        (false, _) if textual => Some(".optional().or(z.literal(''))".to_string()),
        (false, _) => Some(".optional()".to_string()),
    };
    entry(field, base, chain, terminal, notes)
}

fn joi_entry(field: &PlannedField) -> SchemaEntry {
    let base = match field.kind {
        FieldKind::Number => "Joi.number()",
        FieldKind::Date => "Joi.date()",
        FieldKind::Checkbox => "Joi.boolean()",
        FieldKind::MultiSelect => "Joi.array().items(Joi.string())",
        _ => "Joi.string()",
    };
    let mut chain = Vec::new();
    match format_check(field) {
        Some((Format::Email, m)) => {
            chain.push(format!(".email({{ tlds: {{ allow: false }} }}).message({})", js_str(&m)));
        }
        Some((Format::Phone, m)) => {
            chain.push(format!(".pattern({}).message({})", js_regex(PHONE_PATTERN), js_str(&m)));
        }
        None => {}
    }
    let (rules, notes) = constraints(field);
    for c in rules {
        chain.push(match c {
            Constraint::MinLength(n, m) => format!(".min({n}).message({})", js_str(&m)),
            Constraint::MaxLength(n, m) => format!(".max({n}).message({})", js_str(&m)),
            Constraint::Pattern(p, m) => format!(".pattern({}).message({})", js_regex(&p), js_str(&m)),
            Constraint::Min(v, m) => format!(".min({v}).message({})", js_str(&m)),
            Constraint::Max(v, m) => format!(".max({v}).message({})", js_str(&m)),
        });
    }
    let message = js_str(&field.required_message());
    let textual = field.kind.is_textual();
    let presence = if textual {
        format!(".required().messages({{ 'any.required': {message}, 'string.empty': {message} }})")
    } else {
        format!(".required().messages({{ 'any.required': {message} }})")
    };
    let filled = match field.kind {
        FieldKind::MultiSelect => format!(".min(1).message({message})"),
        FieldKind::Checkbox => format!(".valid(true).messages({{ 'any.only': {message} }})"),
        _ => String::new(),
    };
    let terminal = match (field.required, &field.condition) {
        (true, Some(condition)) => {
            let then = match field.kind {
                FieldKind::MultiSelect => "Joi.array()",
                FieldKind::Checkbox => "Joi.boolean()",
                _ => "Joi",
            };
            let otherwise = if textual { ", otherwise: Joi.allow('')" } else { "" };
            Some(format!(
                ".when({}, {{ is: Joi.any().custom((v, h) => ({} ? v : h.error('any.invalid'))), then: {then}{filled}{presence}{otherwise} }})",
                js_str(&condition.source_ident),
                condition.js_test("v")
            ))
        }
        (true, None) => Some(format!("{filled}{presence}")),
        (false, _) if textual => Some(".allow('')".to_string()),
        (false, _) => None,
    };
    entry(field, base.to_string(), chain, terminal, notes)
}

fn class_validator_entry(field: &PlannedField) -> SchemaEntry {
    let format = format_check(field);
    let base = match (field.kind, &format) {
        (_, Some((Format::Email, m))) => format!("@IsEmail({{}}, {{ message: {} }})", js_str(m)),
        (_, Some((Format::Phone, m))) => {
            format!("@Matches({}, {{ message: {} }})", js_regex(PHONE_PATTERN), js_str(m))
        }
        (FieldKind::Number, None) => "@IsNumber()".to_string(),
        (FieldKind::Date, None) => "@IsDateString()".to_string(),
        (FieldKind::Checkbox, None) => "@IsBoolean()".to_string(),
        (FieldKind::MultiSelect, None) => "@IsArray()".to_string(),
        (_, None) => "@IsString()".to_string(),
    };
    let mut decorators = Vec::new();
    if let (true, Some(condition)) = (field.required, &field.condition) {
        let source = format!("o.{}", condition.source_ident);
        decorators.push(format!("@ValidateIf((o) => {})", condition.js_test(&source)));
    }
    if field.kind == FieldKind::MultiSelect {
        decorators.push("@IsString({ each: true })".to_string());
    }
    if field.required {
        let message = js_str(&field.required_message());
        match field.kind {
            FieldKind::MultiSelect => decorators.push(format!("@ArrayNotEmpty({{ message: {message} }})")),
            FieldKind::Checkbox => decorators.push(format!("@Equals(true, {{ message: {message} }})")),
            _ => {}
        }
    }
    let (rules, notes) = constraints(field);
    for c in rules {
        decorators.push(match c {
            Constraint::MinLength(n, m) => format!("@MinLength({n}, {{ message: {} }})", js_str(&m)),
            Constraint::MaxLength(n, m) => format!("@MaxLength({n}, {{ message: {} }})", js_str(&m)),
            Constraint::Pattern(p, m) => format!("@Matches({}, {{ message: {} }})", js_regex(&p), js_str(&m)),
            Constraint::Min(v, m) => format!("@Min({v}, {{ message: {} }})", js_str(&m)),
            Constraint::Max(v, m) => format!("@Max({v}, {{ message: {} }})", js_str(&m)),
        });
    }
    let terminal = if field.required {
        format!("@IsNotEmpty({{ message: {} }})", js_str(&field.required_message()))
    } else {
        "@IsOptional()".to_string()
    };
    let marker = if field.required { "!" } else { "?" };

    let mut entry = entry(field, base, decorators, Some(terminal), notes);
    entry.property = format!("{}{marker}: {};", field.ident, ts_type(field.kind));
    entry
}

/// The `validationSchema` constant, or the decorated class for
/// class-validator.
#[must_use]
pub fn emit_validation_schema(plan: &FormPlan, library: ValidationLibrary) -> String {
    let body: Vec<String> = plan
        .fields
        .iter()
        .map(|f| schema_entry(f, library).render(library))
        .collect();

    let (open, close) = match library {
        ValidationLibrary::Yup => ("const validationSchema = Yup.object({".to_string(), "});".to_string()),
        ValidationLibrary::Zod => ("const validationSchema = z.object({".to_string(), zod_close(plan)),
        ValidationLibrary::Joi => ("const validationSchema = Joi.object({".to_string(), "});".to_string()),
        ValidationLibrary::ClassValidator => (format!("class {CLASS_NAME} {{"), "}".to_string()),
    };
    if body.is_empty() {
        return format!("{open}{close}\n");
    }

    let separator = if library == ValidationLibrary::ClassValidator {
        "\n"
    } else {
        ""
    };
    format!("{open}\n{}{close}\n", body.join(separator))
}

/// JavaScript test that a required value is missing.
fn missing_test(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Checkbox => format!("{value} !== true"),
        FieldKind::MultiSelect => format!("!({value} ?? []).length"),
        _ if kind.is_textual() => format!("!{value}"),
        _ => format!("({value} === undefined || {value} === null || {value} === '')"),
    }
}

/// Closing of the Zod object, with a refinement requiring each
/// conditionally required field while it is visible.
fn zod_close(plan: &FormPlan) -> String {
    let checks: Vec<String> = plan
        .fields
        .iter()
        .filter(|f| f.required)
        .filter_map(|f| f.condition.as_ref().map(|c| (f, c)))
        .map(|(field, condition)| {
            let mut code = format!(
                "  if ({} && {}) {{\n",
                condition.js_test(&format!("data.{}", condition.source_ident)),
                missing_test(field.kind, &format!("data.{}", field.ident))
            );
            code.push_str(&format!(
                "    ctx.addIssue({{ code: z.ZodIssueCode.custom, path: [{}], message: {} }});\n",
                js_str(&field.ident),
                js_str(&field.required_message())
            ));
            code.push_str("  }\n");
            code
        })
        .collect();
    if checks.is_empty() {
        return "});".to_string();
    }
    format!("}}).superRefine((data, ctx) => {{\n{}}});", checks.concat())
}

/// Import line for the validation library.
///
/// `with_validate_sync` adds class-validator's `validateSync`, needed when
/// the form validates without a resolver.
#[must_use]
pub fn validation_import(plan: &FormPlan, library: ValidationLibrary, with_validate_sync: bool) -> String {
    match library {
        ValidationLibrary::Yup => "import * as Yup from 'yup';\n".to_string(),
        ValidationLibrary::Zod => "import { z } from 'zod';\n".to_string(),
        ValidationLibrary::Joi => "import Joi from 'joi';\n".to_string(),
        ValidationLibrary::ClassValidator => {
            let mut names: BTreeSet<String> = BTreeSet::new();
            for field in &plan.fields {
                let entry = schema_entry(field, library);
                names.extend(entry.decorators().map(str::to_string));
            }
            if with_validate_sync {
                names.insert("validateSync".to_string());
            }
            if names.is_empty() {
                return "import 'class-validator';\n".to_string();
            }
            let names: Vec<String> = names.into_iter().collect();
            format!("import {{ {} }} from 'class-validator';\n", names.join(", "))
        }
    }
}

#[cfg(test)]
#[path = "validation/validation_tests.rs"]
mod validation_tests;
