//! formforge-core - Form model, naming, and type mappings
//!
//! This crate provides the generation-neutral building blocks of formforge:
//! - [`FormStructure`] and [`FieldDescriptor`], the model every emitter reads
//! - [`FormSchema`], the designer shape, and the [`adapter`] between the two
//! - [`naming`] conversions for identifiers, tables, and file names
//! - [`mapping`], the per-kind type table shared by all emitters
//! - [`GenerationOptions`] with fallback resolution
//! - [`GeneratedFile`] and [`GeneratedCodeBundle`] for emitter output

pub mod adapter;
mod conditions;
mod error;
pub mod mapping;
mod model;
pub mod naming;
mod options;
mod output;
mod schema;
mod warning;

pub use adapter::{adapt, reverse_adapt};
pub use conditions::{CheckedConditionals, check_conditionals};
pub use error::{GenerationError, GenerationResult};
pub use mapping::TypeMapping;
pub use model::{
    ConditionOperator, ConditionalRule, FieldDescriptor, FieldKind, FieldOption, FormStructure,
    NumericBounds, RuleKind, RuleValue, SectionInfo, UploadConstraints, ValidationRule,
    Visibility,
};
pub use options::{
    BackendFramework, FormLibrary, FrontendTemplate, GenerationOptions, Styling,
    ValidationLibrary,
};
pub use output::{
    AssemblyReport, BundleMetadata, Category, GeneratedCodeBundle, GeneratedFile, Language,
    content_digest,
};
pub use schema::{
    EditorConditional, EditorFieldType, FieldPosition, FormField, FormSchema, FormSection,
};
pub use warning::{ConditionalIssue, GenerationWarning};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::naming::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
    pub use crate::{
        AssemblyReport, Category, FieldDescriptor, FieldKind, FormSchema, FormStructure,
        GeneratedCodeBundle, GeneratedFile, GenerationError, GenerationOptions,
        GenerationResult, GenerationWarning, RuleKind, ValidationRule, adapt, reverse_adapt,
    };
}
