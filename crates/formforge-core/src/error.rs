//! Error types for code generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Fatal errors raised while adapting a schema or emitting code.
///
/// Any of these aborts the current assembly; no partial bundle is returned.
/// Recoverable anomalies are reported as
/// [`GenerationWarning`](crate::GenerationWarning)s instead.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A field type or option value has no generation rule
    #[error("no generation rule for {subject} '{value}'")]
    Mapping { subject: String, value: String },

    /// The form structure violates an invariant
    #[error("invalid form structure: {0}")]
    InvalidStructure(String),

    /// Serialization of a generated manifest failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GenerationError {
    /// Build a mapping error for an editor field type.
    pub fn unmapped_field_type(field_id: &str, field_type: &str) -> Self {
        GenerationError::Mapping {
            subject: format!("field type of '{field_id}'"),
            value: field_type.to_string(),
        }
    }

    /// Returns a stable error code for host applications
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::Mapping { .. } => 1,
            GenerationError::InvalidStructure(_) => 2,
            GenerationError::Serialization(_) => 3,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Serialization(err.to_string())
    }
}
