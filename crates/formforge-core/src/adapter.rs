//! Conversion between the designer schema and the generation model.
//!
//! [`adapt`] flattens a [`FormSchema`] into a [`FormStructure`]: fields are
//! ordered by section then position, palette types are mapped onto
//! [`FieldKind`], layout items are dropped, and declared numeric bounds are
//! turned into `min`/`max` rules. [`reverse_adapt`] goes the other way for
//! structures that did not come from the designer.

use crate::error::{GenerationError, GenerationResult};
use crate::model::{
    ConditionalRule, FieldDescriptor, FormStructure, NumericBounds, RuleKind, RuleValue,
    SectionInfo, UploadConstraints, ValidationRule, Visibility,
};
use crate::schema::{
    EditorConditional, EditorFieldType, FieldPosition, FormField, FormSchema, FormSection,
};

/// Section id used by [`reverse_adapt`].
pub const DEFAULT_SECTION_ID: &str = "section-1";

/// Flatten a designer schema into the generation model.
///
/// # Errors
///
/// [`GenerationError::Mapping`] if a field carries a palette tag with no
/// generation rule, and [`GenerationError::InvalidStructure`] if the
/// resulting fields have empty or duplicate ids.
pub fn adapt(schema: &FormSchema) -> GenerationResult<FormStructure> {
    let mut data_fields = Vec::with_capacity(schema.fields.len());
    for (index, field) in schema.fields.iter().enumerate() {
        let editor_type = field
            .editor_type()
            .ok_or_else(|| GenerationError::unmapped_field_type(&field.id, &field.field_type))?;
        if editor_type.is_layout() {
            tracing::debug!(field_id = %field.id, "skipping layout item {editor_type}");
            continue;
        }
        data_fields.push((sort_key(schema, field, index), editor_type, field));
    }
    data_fields.sort_by_key(|(key, _, _)| *key);

    let mut fields = Vec::with_capacity(data_fields.len());
    for (order, (_, editor_type, field)) in data_fields.into_iter().enumerate() {
        fields.push(adapt_field(field, editor_type, order as u32)?);
    }

    let structure = FormStructure {
        title: Some(schema.name.trim().to_string()).filter(|t| !t.is_empty()),
        sections: section_infos(schema, &fields),
        fields,
    };
    structure.validate()?;

    tracing::debug!(
        fields = structure.fields.len(),
        skipped = schema.fields.len() - structure.fields.len(),
        "adapted form schema '{}'",
        schema.name
    );
    Ok(structure)
}

/// `(section known?, section order, section index, field order, field index)`.
///
/// Fields in an unknown section sort after every known section.
fn sort_key(schema: &FormSchema, field: &FormField, index: usize) -> (u8, u32, usize, u32, usize) {
    match schema
        .sections
        .iter()
        .enumerate()
        .find(|(_, s)| s.id == field.position.section_id)
    {
        Some((section_index, section)) => (
            0,
            section.order,
            section_index,
            field.position.order,
            index,
        ),
        None => (1, 0, 0, field.position.order, index),
    }
}

fn adapt_field(
    field: &FormField,
    editor_type: EditorFieldType,
    order: u32,
) -> GenerationResult<FieldDescriptor> {
    let kind = editor_type
        .abstract_kind()
        .ok_or_else(|| GenerationError::unmapped_field_type(&field.id, &field.field_type))?;

    let mut descriptor = FieldDescriptor::new(&field.id, &field.label, kind).with_order(order);
    descriptor.required = field.required;
    descriptor.default_value = field.default_value.clone();
    descriptor.placeholder = field.placeholder.clone().filter(|p| !p.is_empty());
    descriptor.rules = field.validations.clone();

    if kind.has_choices() {
        descriptor.options = field.options.clone();
    }

    if kind.is_numeric() && (field.min.is_some() || field.max.is_some() || field.step.is_some()) {
        descriptor.bounds = Some(NumericBounds {
            min: field.min,
            max: field.max,
            step: field.step,
        });
        if let Some(min) = field.min {
            let value = RuleValue::Number(min);
            descriptor.rules.push(
                ValidationRule::new(RuleKind::Min)
                    .with_message(format!("Must be at least {value}"))
                    .with_value(value),
            );
        }
        if let Some(max) = field.max {
            let value = RuleValue::Number(max);
            descriptor.rules.push(
                ValidationRule::new(RuleKind::Max)
                    .with_message(format!("Must not exceed {value}"))
                    .with_value(value),
            );
        }
    }

    if editor_type == EditorFieldType::FileUpload {
        descriptor.upload = Some(UploadConstraints {
            accept: field.accept.clone(),
            max_file_size: field.max_file_size,
            multiple: field.multiple,
        });
    }

    descriptor.conditional = field.conditional.as_ref().map(|c| ConditionalRule {
        action: c.visibility(),
        source_field_id: c.when.clone(),
        operator: c.operator,
        value: c.value.clone(),
    });

    Ok(descriptor)
}

fn section_infos(schema: &FormSchema, fields: &[FieldDescriptor]) -> Vec<SectionInfo> {
    let mut sections: Vec<&FormSection> = schema.sections.iter().collect();
    sections.sort_by_key(|s| s.order);

    sections
        .into_iter()
        .map(|section| SectionInfo {
            id: section.id.clone(),
            title: section.title.clone(),
            field_ids: fields
                .iter()
                .filter(|f| {
                    schema
                        .fields
                        .iter()
                        .any(|src| src.id == f.id && src.position.section_id == section.id)
                })
                .map(|f| f.id.clone())
                .collect(),
        })
        .collect()
}

/// Rebuild a designer schema from a generation structure.
///
/// All fields land in one section, in order, with a palette type that maps
/// back onto the same [`FieldKind`].
#[must_use]
pub fn reverse_adapt(structure: &FormStructure) -> FormSchema {
    let name = structure
        .title
        .clone()
        .unwrap_or_else(|| "Untitled Form".to_string());

    let fields = structure
        .fields
        .iter()
        .enumerate()
        .map(|(order, field)| reverse_field(field, order as u32))
        .collect();

    FormSchema {
        id: String::new(),
        name: name.clone(),
        description: String::new(),
        sections: vec![FormSection {
            id: DEFAULT_SECTION_ID.to_string(),
            title: name,
            description: None,
            order: 0,
        }],
        fields,
    }
}

fn reverse_field(field: &FieldDescriptor, order: u32) -> FormField {
    let bounds = field.numeric_bounds().copied().unwrap_or_default();

    // Bounds are written back as min/max, which `adapt` turns into rules
    // again; keep those rules out of the validation list.
    let validations = field
        .rules
        .iter()
        .filter(|r| match r.kind {
            RuleKind::Min => bounds.min.is_none(),
            RuleKind::Max => bounds.max.is_none(),
            _ => true,
        })
        .cloned()
        .collect();

    let upload = field.upload.clone().unwrap_or_default();

    FormField {
        id: field.id.clone(),
        field_type: EditorFieldType::for_kind(field.kind).as_str().to_string(),
        label: field.label.clone(),
        placeholder: field.placeholder.clone(),
        help_text: None,
        default_value: field.default_value.clone(),
        required: field.required,
        validations,
        conditional: field.conditional.as_ref().map(|c| EditorConditional {
            show: c.action == Visibility::Show,
            when: c.source_field_id.clone(),
            operator: c.operator,
            value: c.value.clone(),
        }),
        options: field.choices().to_vec(),
        multiple: upload.multiple,
        accept: upload.accept,
        max_file_size: upload.max_file_size,
        min: bounds.min,
        max: bounds.max,
        step: bounds.step,
        position: FieldPosition {
            section_id: DEFAULT_SECTION_ID.to_string(),
            order,
        },
    }
}
