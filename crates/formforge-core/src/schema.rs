//! Editor-side form schema.
//!
//! This is the shape a visual form designer saves: fields carry their
//! section and position, and the type tag comes from the designer's
//! palette, which is richer than [`FieldKind`]. [`crate::adapter`] turns it
//! into a [`FormStructure`](crate::FormStructure).

use crate::error::GenerationResult;
use crate::model::{
    ConditionOperator, FieldKind, FieldOption, RuleValue, ValidationRule, Visibility,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field types offered by the designer palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorFieldType {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Time,
    Textarea,
    Select,
    Radio,
    Checkbox,
    CheckboxGroup,
    MultiSelect,
    FileUpload,
    RichText,
    Signature,
    Rating,
    Tags,
    ColorPicker,
    Slider,
    DateRange,
    AutoComplete,
    Section,
    Columns,
    Divider,
}

impl EditorFieldType {
    pub const ALL: [EditorFieldType; 24] = [
        Self::Text,
        Self::Email,
        Self::Phone,
        Self::Number,
        Self::Date,
        Self::Time,
        Self::Textarea,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::CheckboxGroup,
        Self::MultiSelect,
        Self::FileUpload,
        Self::RichText,
        Self::Signature,
        Self::Rating,
        Self::Tags,
        Self::ColorPicker,
        Self::Slider,
        Self::DateRange,
        Self::AutoComplete,
        Self::Section,
        Self::Columns,
        Self::Divider,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Textarea => "TEXTAREA",
            Self::Select => "SELECT",
            Self::Radio => "RADIO",
            Self::Checkbox => "CHECKBOX",
            Self::CheckboxGroup => "CHECKBOX_GROUP",
            Self::MultiSelect => "MULTI_SELECT",
            Self::FileUpload => "FILE_UPLOAD",
            Self::RichText => "RICH_TEXT",
            Self::Signature => "SIGNATURE",
            Self::Rating => "RATING",
            Self::Tags => "TAGS",
            Self::ColorPicker => "COLOR_PICKER",
            Self::Slider => "SLIDER",
            Self::DateRange => "DATE_RANGE",
            Self::AutoComplete => "AUTO_COMPLETE",
            Self::Section => "SECTION",
            Self::Columns => "COLUMNS",
            Self::Divider => "DIVIDER",
        }
    }

    /// Parse a palette tag (exact, upper-case).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Layout items organise the canvas and hold no data.
    #[must_use]
    pub fn is_layout(&self) -> bool {
        matches!(self, Self::Section | Self::Columns | Self::Divider)
    }

    /// The abstract kind this palette type generates as.
    ///
    /// Several types collapse onto the nearest primitive: uploads,
    /// signatures, tags, colours, date ranges and autocompletes become free
    /// text; rich text becomes a textarea; ratings and sliders become
    /// numbers. Layout items return `None`.
    #[must_use]
    pub fn abstract_kind(&self) -> Option<FieldKind> {
        let kind = match self {
            Self::Text
            | Self::Time
            | Self::FileUpload
            | Self::Signature
            | Self::Tags
            | Self::ColorPicker
            | Self::DateRange
            | Self::AutoComplete => FieldKind::Text,
            Self::Email => FieldKind::Email,
            Self::Phone => FieldKind::Phone,
            Self::Number | Self::Rating | Self::Slider => FieldKind::Number,
            Self::Date => FieldKind::Date,
            Self::Textarea | Self::RichText => FieldKind::Textarea,
            Self::Select => FieldKind::Select,
            Self::Radio => FieldKind::Radio,
            Self::Checkbox => FieldKind::Checkbox,
            Self::CheckboxGroup | Self::MultiSelect => FieldKind::MultiSelect,
            Self::Section | Self::Columns | Self::Divider => return None,
        };
        Some(kind)
    }

    /// The palette type that generates as `kind` with no loss.
    #[must_use]
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text,
            FieldKind::Email => Self::Email,
            FieldKind::Phone => Self::Phone,
            FieldKind::Number => Self::Number,
            FieldKind::Date => Self::Date,
            FieldKind::Checkbox => Self::Checkbox,
            FieldKind::Radio => Self::Radio,
            FieldKind::Select => Self::Select,
            FieldKind::MultiSelect => Self::MultiSelect,
            FieldKind::Textarea => Self::Textarea,
        }
    }
}

impl fmt::Display for EditorFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field sits on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPosition {
    pub section_id: String,
    pub order: u32,
}

/// Conditional visibility as the designer stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConditional {
    /// `true` shows the field when the condition holds, `false` hides it.
    pub show: bool,
    /// Source field id.
    pub when: String,
    pub operator: ConditionOperator,
    pub value: RuleValue,
}

impl EditorConditional {
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.show {
            Visibility::Show
        } else {
            Visibility::Hide
        }
    }
}

/// One designer field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,

    /// Palette tag, e.g. `"FILE_UPLOAD"`. Kept as text so unknown tags can
    /// be reported instead of failing deserialization.
    #[serde(rename = "type")]
    pub field_type: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<RuleValue>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub validations: Vec<ValidationRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<EditorConditional>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default)]
    pub multiple: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    pub position: FieldPosition,
}

impl FormField {
    /// The parsed palette type, if the tag is known.
    #[must_use]
    pub fn editor_type(&self) -> Option<EditorFieldType> {
        EditorFieldType::parse(&self.field_type)
    }
}

/// A designer section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: u32,
}

/// A saved designer form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<FormSection>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Parse a schema from the designer's JSON.
    pub fn from_json(json: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}
