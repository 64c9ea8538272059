//! Conditional-rule validation.

use crate::model::{ConditionalRule, FormStructure};
use crate::warning::{ConditionalIssue, GenerationWarning};

/// Conditional rules that may be emitted, aligned with the form's fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckedConditionals {
    /// `rules[i]` is the rule kept for `fields[i]`, if any.
    pub rules: Vec<Option<ConditionalRule>>,
    /// One entry per dropped rule.
    pub warnings: Vec<GenerationWarning>,
}

/// Keep only rules whose source field precedes their owner.
///
/// A rule pointing at a later field, at its own field, or at no field at
/// all is dropped: the owner becomes always visible and a
/// [`GenerationWarning::DroppedConditionalRule`] names it.
#[must_use]
pub fn check_conditionals(structure: &FormStructure) -> CheckedConditionals {
    let mut checked = CheckedConditionals::default();

    for (index, field) in structure.fields.iter().enumerate() {
        let Some(rule) = &field.conditional else {
            checked.rules.push(None);
            continue;
        };

        let issue = if rule.source_field_id == field.id {
            Some(ConditionalIssue::SelfReference)
        } else {
            match structure.position_of(&rule.source_field_id) {
                None => Some(ConditionalIssue::UnknownSource),
                Some(source) if source > index => Some(ConditionalIssue::ForwardReference),
                Some(_) => None,
            }
        };

        match issue {
            None => checked.rules.push(Some(rule.clone())),
            Some(reason) => {
                tracing::debug!(
                    field_id = %field.id,
                    source = %rule.source_field_id,
                    "dropping conditional rule: {}",
                    reason.as_str()
                );
                checked.rules.push(None);
                checked.warnings.push(GenerationWarning::DroppedConditionalRule {
                    field_id: field.id.clone(),
                    source_field_id: rule.source_field_id.clone(),
                    reason,
                });
            }
        }
    }

    checked
}
