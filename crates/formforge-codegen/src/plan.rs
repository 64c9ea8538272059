//! Identifier planning.
//!
//! Before any emitter runs, every field gets its identifiers fixed once:
//! a camelCase property name for TypeScript and JavaScript, a PascalCase
//! name for C# and T-SQL, and a snake_case column for the generic SQL
//! dialect. Emitters read the plan and never derive names themselves, so
//! the frontend, the SQL, and the backend always agree.
//!
//! Identifiers are unique within a form. A clash with an earlier field or
//! with a column the generated code reserves for itself gets a numeric
//! suffix (`email`, `email2`, ...). So does a name that would repeat one
//! of the generated C# class names. Labels that produce no identifier or
//! one starting with a digit are prefixed with `field`.

use crate::text::js_str;
use formforge_core::naming::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use formforge_core::{
    ConditionOperator, FieldKind, FieldOption, FormStructure, GenerationResult, GenerationWarning,
    NumericBounds, RuleKind, RuleValue, ValidationRule, Visibility, check_conditionals,
};
use std::collections::HashSet;

/// Identifiers the generated backends use for their own columns.
const RESERVED: [&str; 6] = [
    "id",
    "createdAt",
    "updatedAt",
    "createdBy",
    "updatedBy",
    "isDeleted",
];

/// Name used when the project name yields no identifier.
const FALLBACK_PROJECT: &str = "Generated";

/// Every casing of the project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNames {
    /// The name as given.
    pub display: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
}

impl ProjectNames {
    #[must_use]
    pub fn new(project_name: &str) -> Self {
        let display = project_name.trim();
        let source = if to_pascal_case(display).is_empty() {
            FALLBACK_PROJECT
        } else {
            display
        };
        let pascal = upper_first(&to_camel_case(source));
        let pascal = if pascal.starts_with(|c: char| c.is_ascii_digit()) {
            format!("Form{pascal}")
        } else {
            pascal
        };

        Self {
            display: if display.is_empty() {
                FALLBACK_PROJECT.to_string()
            } else {
                display.to_string()
            },
            camel: to_camel_case(&pascal),
            snake: to_snake_case(&pascal),
            kebab: to_kebab_case(&pascal),
            pascal,
        }
    }

    /// Name of the generated React component.
    #[must_use]
    pub fn component(&self) -> String {
        format!("{}Form", self.pascal)
    }

    /// Generated C# classes that hold one property per field. A member
    /// may not share its enclosing class's name.
    #[must_use]
    pub fn field_classes(&self) -> [String; 4] {
        let pascal = &self.pascal;
        [
            pascal.clone(),
            format!("{pascal}Dto"),
            format!("Create{pascal}Dto"),
            format!("Update{pascal}Dto"),
        ]
    }
}

/// A conditional rule with its source resolved to a planned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCondition {
    pub action: Visibility,
    pub source_ident: String,
    pub source_kind: FieldKind,
    pub operator: ConditionOperator,
    pub value: RuleValue,
}

impl PlannedCondition {
    /// JavaScript expression that is true while the dependent field is
    /// visible, given an expression reading the source value.
    #[must_use]
    pub fn js_test(&self, current: &str) -> String {
        let value = &self.value;
        let text = js_str(&value.to_string());

        let test = match (self.operator, self.source_kind) {
            (ConditionOperator::Contains, FieldKind::MultiSelect) => {
                format!("({current} ?? []).includes({text})")
            }
            (ConditionOperator::Contains, _) => format!("String({current} ?? '').includes({text})"),
            (ConditionOperator::Equals | ConditionOperator::NotEquals, FieldKind::Checkbox) => {
                let op = if self.operator == ConditionOperator::Equals { "===" } else { "!==" };
                format!("Boolean({current}) {op} {}", truthy(value))
            }
            (ConditionOperator::Equals | ConditionOperator::NotEquals, kind) => {
                let op = if self.operator == ConditionOperator::Equals { "===" } else { "!==" };
                match value.as_f64() {
                    Some(n) if kind == FieldKind::Number => format!("Number({current}) {op} {}", number_literal(n)),
                    _ => format!("String({current} ?? '') {op} {text}"),
                }
            }
            (ConditionOperator::GreaterThan | ConditionOperator::LessThan, _) => {
                let op = if self.operator == ConditionOperator::GreaterThan { ">" } else { "<" };
                match value.as_f64() {
                    Some(n) => format!("Number({current}) {op} {}", number_literal(n)),
                    None => format!("String({current} ?? '') {op} {text}"),
                }
            }
        };

        match self.action {
            Visibility::Show => test,
            Visibility::Hide => format!("!({test})"),
        }
    }
}

fn number_literal(n: f64) -> String {
    RuleValue::Number(n).to_string()
}

fn truthy(value: &RuleValue) -> bool {
    match value {
        RuleValue::Bool(b) => *b,
        RuleValue::Number(n) => *n != 0.0,
        RuleValue::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "on" | "1"),
    }
}

/// One field with its identifiers fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// camelCase property name.
    pub ident: String,
    /// PascalCase name for C# properties and T-SQL columns.
    pub pascal: String,
    /// snake_case column for the generic SQL dialect.
    pub column: String,
    /// Effective rules other than `required`, last occurrence per kind.
    pub rules: Vec<ValidationRule>,
    pub options: Vec<FieldOption>,
    pub bounds: Option<NumericBounds>,
    pub placeholder: Option<String>,
    pub default_value: Option<RuleValue>,
    pub condition: Option<PlannedCondition>,
    required_rule_message: Option<String>,
}

impl PlannedField {
    #[must_use]
    pub fn rule(&self, kind: RuleKind) -> Option<&ValidationRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    /// Message used when a required field is left empty.
    #[must_use]
    pub fn required_message(&self) -> String {
        match (&self.required_rule_message, self.label.as_str()) {
            (Some(message), _) => message.clone(),
            (None, "") => "This field is required".to_string(),
            (None, label) => format!("{label} is required"),
        }
    }
}

/// The planned form: project names plus fields in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPlan {
    pub title: Option<String>,
    pub project: ProjectNames,
    pub fields: Vec<PlannedField>,
}

impl FormPlan {
    /// Plan a validated structure.
    ///
    /// Returns the warnings found while planning: dropped conditional rules
    /// and collapsed rule conflicts, in field order.
    pub fn build(
        structure: &FormStructure,
        project_name: &str,
    ) -> GenerationResult<(Self, Vec<GenerationWarning>)> {
        structure.validate()?;

        let checked = check_conditionals(structure);
        let mut warnings = checked.warnings;
        let project = ProjectNames::new(project_name);
        let mut taken = Taken {
            classes: project.field_classes().to_vec(),
            ..Taken::default()
        };
        let mut fields: Vec<PlannedField> = Vec::with_capacity(structure.fields.len());

        for (field, condition) in structure.fields.iter().zip(checked.rules) {
            for kind in field.conflicting_rule_kinds() {
                tracing::debug!(field_id = %field.id, rule = %kind, "collapsing duplicate rules");
                warnings.push(GenerationWarning::RuleConflict {
                    field_id: field.id.clone(),
                    rule: kind,
                });
            }

            let ident = taken.claim(&base_ident(&field.label, &field.id));
            let effective = field.effective_rules();
            let required_rule_message = effective
                .iter()
                .find(|r| r.kind == RuleKind::Required)
                .and_then(|r| r.message())
                .map(str::to_string);

            let condition = condition.and_then(|rule| {
                let source = structure
                    .position_of(&rule.source_field_id)
                    .and_then(|i| fields.get(i))?;
                Some(PlannedCondition {
                    action: rule.action,
                    source_ident: source.ident.clone(),
                    source_kind: source.kind,
                    operator: rule.operator,
                    value: rule.value,
                })
            });

            fields.push(PlannedField {
                id: field.id.clone(),
                label: field.label.trim().to_string(),
                kind: field.kind,
                required: field.is_required(),
                pascal: upper_first(&ident),
                column: to_snake_case(&ident),
                ident,
                rules: effective
                    .into_iter()
                    .filter(|r| r.kind != RuleKind::Required)
                    .cloned()
                    .collect(),
                options: field.choices().to_vec(),
                bounds: field.numeric_bounds().copied(),
                placeholder: field
                    .placeholder
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
                default_value: field.default_value.clone(),
                condition,
                required_rule_message,
            });
        }

        let plan = Self {
            title: structure.title.clone(),
            project,
            fields,
        };
        Ok((plan, warnings))
    }

    #[must_use]
    pub fn has_required(&self) -> bool {
        self.fields.iter().any(|f| f.required)
    }

    #[must_use]
    pub fn has_conditions(&self) -> bool {
        self.fields.iter().any(|f| f.condition.is_some())
    }
}

/// camelCase identifier before de-duplication.
fn base_ident(label: &str, id: &str) -> String {
    let mut ident = to_camel_case(label);
    if ident.is_empty() {
        ident = to_camel_case(&format!("field {id}"));
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident = to_camel_case(&format!("field {ident}"));
    }
    ident
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Identifiers already handed out, compared the way the targets compare them.
#[derive(Default)]
struct Taken {
    lowered: HashSet<String>,
    columns: HashSet<String>,
    /// Class names a PascalCase property must not repeat.
    classes: Vec<String>,
}

impl Taken {
    fn is_free(&self, ident: &str) -> bool {
        let lowered = ident.to_ascii_lowercase();
        let column = to_snake_case(ident);
        !self.lowered.contains(&lowered)
            && !self.columns.contains(&column)
            && !RESERVED.iter().any(|r| r.eq_ignore_ascii_case(ident))
            && !RESERVED.iter().any(|r| to_snake_case(r) == column)
            && !self.classes.iter().any(|c| c.eq_ignore_ascii_case(ident))
    }

    fn claim(&mut self, base: &str) -> String {
        let mut ident = base.to_string();
        let mut n = 2;
        while !self.is_free(&ident) {
            ident = format!("{base}{n}");
            n += 1;
        }
        self.lowered.insert(ident.to_ascii_lowercase());
        self.columns.insert(to_snake_case(&ident));
        ident
    }
}

#[cfg(test)]
#[path = "plan/plan_tests.rs"]
mod plan_tests;
