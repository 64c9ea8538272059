//! Emitter-neutral form model.
//!
//! This module defines the representation every emitter consumes. It is a
//! flattened, language-agnostic view of a designed form: an ordered list of
//! [`FieldDescriptor`]s with their validation and visibility rules.
//!
//! # Structure
//!
//! - [`FormStructure`]: the unit handed to emitters
//! - [`FieldDescriptor`]: one field with its abstract [`FieldKind`]
//! - [`ValidationRule`]: a single constraint attached to a field
//! - [`ConditionalRule`]: show/hide a field based on an earlier field's value
//!
//! The abstract [`FieldKind`] decides which optional attributes are
//! meaningful. Accessors such as [`FieldDescriptor::choices`] enforce that
//! contract so emitters never read options off a text field.

use crate::error::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Abstract field type used at generation time.
///
/// Coarser than the editor's palette: several editor types collapse onto one
/// of these (see [`crate::adapter`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Numeric value.
    Number,
    /// Calendar date.
    Date,
    /// Boolean checkbox.
    Checkbox,
    /// Single choice rendered as radio buttons.
    Radio,
    /// Single choice rendered as a dropdown.
    Select,
    /// Multiple choices.
    MultiSelect,
    /// Multi-line free text.
    Textarea,
}

impl FieldKind {
    /// Every abstract kind, in declaration order.
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Checkbox,
        FieldKind::Radio,
        FieldKind::Select,
        FieldKind::MultiSelect,
        FieldKind::Textarea,
    ];

    /// Get the wire tag (e.g., "MULTI_SELECT").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Checkbox => "CHECKBOX",
            Self::Radio => "RADIO",
            Self::Select => "SELECT",
            Self::MultiSelect => "MULTI_SELECT",
            Self::Textarea => "TEXTAREA",
        }
    }

    /// Parse a kind from its tag.
    ///
    /// Case-insensitive; `-` is accepted in place of `_`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&normalized))
    }

    /// Whether this kind carries a list of `{label, value}` choices.
    #[must_use]
    pub fn has_choices(&self) -> bool {
        matches!(self, Self::Radio | Self::Select | Self::MultiSelect)
    }

    /// Whether numeric bounds (min/max/step) apply.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number)
    }

    /// Whether the value is a string, so length and pattern rules apply.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Phone | Self::Textarea | Self::Radio | Self::Select
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    Phone,
    Min,
    Max,
    Custom,
}

impl RuleKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Min => "min",
            Self::Max => "max",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar attached to a rule, default value, or condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RuleValue {
    /// Numeric view of the value. Text is parsed; booleans are not numbers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Non-negative integer view, used for length limits.
    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        self.as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as usize)
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A single validation constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// What the rule checks. The editor sends this as `type`.
    #[serde(alias = "type")]
    pub kind: RuleKind,

    /// Rule parameter (length, bound, pattern source).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,

    /// Custom error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    #[must_use]
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            value: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<RuleValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The message, treating an empty string as absent.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Whether a matching condition shows or hides the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Show,
    Hide,
}

/// Comparison applied to the source field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

/// Show or hide a field depending on an earlier field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub action: Visibility,

    /// Id of the field whose value is inspected. Must precede the owner.
    pub source_field_id: String,

    pub operator: ConditionOperator,

    pub value: RuleValue,
}

/// One choice of a selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Numeric limits for number fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Accept list and size limit carried over from upload fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub multiple: bool,
}

/// One form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier, unique within the form.
    pub id: String,

    /// Display label; identifiers are derived from it.
    pub label: String,

    /// Abstract type.
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    /// Position within the flattened form.
    #[serde(default)]
    pub order: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<RuleValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<NumericBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConstraints>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ValidationRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,
}

impl FieldDescriptor {
    /// Create an optional field with no rules.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            order: 0,
            default_value: None,
            placeholder: None,
            options: Vec::new(),
            bounds: None,
            upload: None,
            rules: Vec::new(),
            conditional: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use]
    pub fn with_conditional(mut self, rule: ConditionalRule) -> Self {
        self.conditional = Some(rule);
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Required either by flag or by an explicit `required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required || self.rules.iter().any(|r| r.kind == RuleKind::Required)
    }

    /// Choices, or an empty slice when the kind has none.
    #[must_use]
    pub fn choices(&self) -> &[FieldOption] {
        if self.kind.has_choices() {
            &self.options
        } else {
            &[]
        }
    }

    /// Numeric bounds, only for numeric kinds.
    #[must_use]
    pub fn numeric_bounds(&self) -> Option<&NumericBounds> {
        self.bounds.as_ref().filter(|_| self.kind.is_numeric())
    }

    /// Rules de-duplicated by kind, last occurrence wins.
    ///
    /// The result keeps the relative order of the surviving rules, so two
    /// calls on the same field always agree.
    #[must_use]
    pub fn effective_rules(&self) -> Vec<&ValidationRule> {
        self.rules
            .iter()
            .enumerate()
            .filter(|&(i, rule)| !self.rules[i + 1..].iter().any(|r| r.kind == rule.kind))
            .map(|(_, rule)| rule)
            .collect()
    }

    /// Kinds that appear more than once on this field, in first-seen order.
    #[must_use]
    pub fn conflicting_rule_kinds(&self) -> Vec<RuleKind> {
        let mut seen = HashSet::new();
        let mut conflicts = Vec::new();
        for rule in &self.rules {
            if !seen.insert(rule.kind) && !conflicts.contains(&rule.kind) {
                conflicts.push(rule.kind);
            }
        }
        conflicts
    }

    /// The surviving rule of a given kind.
    #[must_use]
    pub fn rule(&self, kind: RuleKind) -> Option<&ValidationRule> {
        self.rules.iter().rev().find(|r| r.kind == kind)
    }
}

/// Display-only grouping of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub field_ids: Vec<String>,
}

/// The flattened form every emitter consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Fields in document order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Grouping metadata; not used for generation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionInfo>,
}

impl FormStructure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            fields: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Append a field, assigning the next order position.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        let order = self.fields.len() as u32;
        self.fields.push(field.with_order(order));
        self
    }

    /// Parse a structure from JSON.
    pub fn from_json(json: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Index of a field in document order.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Check structural invariants: non-empty, unique field ids.
    pub fn validate(&self) -> GenerationResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.id.trim().is_empty() {
                return Err(GenerationError::InvalidStructure(format!(
                    "field '{}' has an empty id",
                    field.label
                )));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(GenerationError::InvalidStructure(format!(
                    "duplicate field id '{}'",
                    field.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;
