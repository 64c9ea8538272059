//! Non-fatal anomalies reported alongside a successful generation.

use crate::model::RuleKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a conditional rule was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalIssue {
    /// The source field comes after the owning field.
    ForwardReference,
    /// The rule points at its own field.
    SelfReference,
    /// No field has the referenced id.
    UnknownSource,
}

impl ConditionalIssue {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardReference => "source field does not precede it",
            Self::SelfReference => "source field is the field itself",
            Self::UnknownSource => "source field does not exist",
        }
    }
}

/// A recoverable anomaly. Generation continues; the host decides how to
/// surface it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationWarning {
    /// A conditional rule was ignored and the field is always visible.
    #[serde(rename_all = "camelCase")]
    DroppedConditionalRule {
        field_id: String,
        source_field_id: String,
        reason: ConditionalIssue,
    },

    /// Several rules of the same kind were collapsed to the last one.
    #[serde(rename_all = "camelCase")]
    RuleConflict { field_id: String, rule: RuleKind },

    /// An option value has no emitter and a neighbour was used.
    #[serde(rename_all = "camelCase")]
    OptionFallback {
        option: String,
        requested: String,
        used: String,
    },
}

impl GenerationWarning {
    /// The field this warning concerns, if any.
    #[must_use]
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::DroppedConditionalRule { field_id, .. } | Self::RuleConflict { field_id, .. } => {
                Some(field_id)
            }
            Self::OptionFallback { .. } => None,
        }
    }
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedConditionalRule {
                field_id,
                source_field_id,
                reason,
            } => write!(
                f,
                "conditional rule on '{field_id}' referencing '{source_field_id}' dropped: {}",
                reason.as_str()
            ),
            Self::RuleConflict { field_id, rule } => write!(
                f,
                "field '{field_id}' has several '{rule}' rules; the last one is used"
            ),
            Self::OptionFallback {
                option,
                requested,
                used,
            } => write!(
                f,
                "{option} '{requested}' is not supported; generating '{used}' instead"
            ),
        }
    }
}
