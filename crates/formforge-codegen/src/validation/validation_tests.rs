#![allow(non_snake_case)]

use super::*;
use formforge_core::{
    ConditionOperator, ConditionalRule, FieldDescriptor, FormStructure, RuleValue, Visibility,
};
use test_case::test_case;

fn plan_of(fields: Vec<FieldDescriptor>) -> FormPlan {
    let structure = fields
        .into_iter()
        .fold(FormStructure::new("T"), FormStructure::with_field);
    FormPlan::build(&structure, "Demo").unwrap().0
}

fn single(field: FieldDescriptor, library: ValidationLibrary) -> String {
    let plan = plan_of(vec![field]);
    schema_entry(&plan.fields[0], library).render(library)
}

/// Occurrences of the library's required markers in an entry.
fn required_markers(rendered: &str, library: ValidationLibrary) -> usize {
    let markers: &[&str] = match library {
        ValidationLibrary::Yup => &[".required("],
        ValidationLibrary::Zod => &[".min(1, ", "required_error"],
        ValidationLibrary::Joi => &[".required()"],
        ValidationLibrary::ClassValidator => &["@IsNotEmpty("],
    };
    markers.iter().map(|m| rendered.matches(m).count()).sum()
}

/// Constraint rejecting an empty list or an unticked box, per library.
fn filled_constraint(kind: FieldKind, library: ValidationLibrary) -> Option<&'static str> {
    match (kind, library) {
        (FieldKind::MultiSelect, ValidationLibrary::Yup) => Some(".min(1, 'Answer is required')"),
        (FieldKind::MultiSelect, ValidationLibrary::Zod) => Some(".nonempty({ message: 'Answer is required' })"),
        (FieldKind::MultiSelect, ValidationLibrary::Joi) => Some(".min(1).message('Answer is required')"),
        (FieldKind::MultiSelect, ValidationLibrary::ClassValidator) => {
            Some("@ArrayNotEmpty({ message: 'Answer is required' })")
        }
        (FieldKind::Checkbox, ValidationLibrary::Yup) => Some(".oneOf([true], 'Answer is required')"),
        (FieldKind::Checkbox, ValidationLibrary::Zod) => {
            Some(".refine((v) => v === true, { message: 'Answer is required' })")
        }
        (FieldKind::Checkbox, ValidationLibrary::Joi) => Some(".valid(true).messages({ 'any.only': 'Answer is required' })"),
        (FieldKind::Checkbox, ValidationLibrary::ClassValidator) => {
            Some("@Equals(true, { message: 'Answer is required' })")
        }
        _ => None,
    }
}

#[test]
fn schema_entry___every_library_and_kind___required_field_has_one_marker() {
    for &library in ValidationLibrary::ALL {
        for kind in FieldKind::ALL {
            let rendered = single(FieldDescriptor::new("a", "Answer", kind).required(), library);
            assert_eq!(
                required_markers(&rendered, library),
                1,
                "{library} {kind}: {rendered}"
            );
            if let Some(constraint) = filled_constraint(kind, library) {
                assert!(rendered.contains(constraint), "{library} {kind}: {rendered}");
            }
        }
    }
}

#[test]
fn schema_entry___optional_list_and_checkbox___accept_empty_values() {
    for &library in ValidationLibrary::ALL {
        for kind in [FieldKind::MultiSelect, FieldKind::Checkbox] {
            let rendered = single(FieldDescriptor::new("a", "Answer", kind), library);
            let constraint = filled_constraint(kind, library).unwrap();
            assert!(!rendered.contains(constraint), "{library} {kind}: {rendered}");
        }
    }
}

fn conditional_plan() -> FormPlan {
    plan_of(vec![
        FieldDescriptor::new("h", "Has Details", FieldKind::Checkbox),
        FieldDescriptor::new("d", "Details", FieldKind::Text)
            .required()
            .with_conditional(ConditionalRule {
                action: Visibility::Show,
                source_field_id: "h".to_string(),
                operator: ConditionOperator::Equals,
                value: RuleValue::Bool(true),
            }),
    ])
}

#[test_case(
    ValidationLibrary::Yup,
    "details: Yup.string().when('hasDetails', { is: (v) => Boolean(v) === true, then: (s) => s.required('Details is required'), otherwise: (s) => s.notRequired() }),";
    "yup"
)]
#[test_case(
    ValidationLibrary::Joi,
    "details: Joi.string().when('hasDetails', { is: Joi.any().custom((v, h) => (Boolean(v) === true ? v : h.error('any.invalid'))), then: Joi.required().messages({ 'any.required': 'Details is required', 'string.empty': 'Details is required' }), otherwise: Joi.allow('') }),";
    "joi"
)]
#[test_case(
    ValidationLibrary::ClassValidator,
    "  @IsNotEmpty({ message: 'Details is required' })\n  @IsString()\n  @ValidateIf((o) => Boolean(o.hasDetails) === true)\n  details!: string;";
    "class validator"
)]
fn emit_validation_schema___conditional_required_field___is_required_only_while_visible(
    library: ValidationLibrary,
    expected: &str,
) {
    let schema = emit_validation_schema(&conditional_plan(), library);

    assert!(schema.contains(expected), "{schema}");
}

#[test]
fn emit_validation_schema___zod_conditional_required_field___checked_by_refinement() {
    let schema = emit_validation_schema(&conditional_plan(), ValidationLibrary::Zod);

    assert!(schema.contains("  details: z.string().optional().or(z.literal('')),\n"));
    assert!(!schema.contains(".min(1, 'Details is required')"));
    assert!(schema.ends_with(concat!(
        "}).superRefine((data, ctx) => {\n",
        "  if (Boolean(data.hasDetails) === true && !data.details) {\n",
        "    ctx.addIssue({ code: z.ZodIssueCode.custom, path: ['details'], message: 'Details is required' });\n",
        "  }\n",
        "});\n",
    )));
}

#[test]
fn emit_validation_schema___zod_without_conditions___has_no_refinement() {
    let plan = plan_of(vec![FieldDescriptor::new("n", "Name", FieldKind::Text).required()]);

    let schema = emit_validation_schema(&plan, ValidationLibrary::Zod);

    assert!(!schema.contains("superRefine"));
    assert!(schema.ends_with("});\n"));
}

#[test]
fn schema_entry___every_library_and_kind___optional_field_has_no_marker() {
    for &library in ValidationLibrary::ALL {
        for kind in FieldKind::ALL {
            let rendered = single(FieldDescriptor::new("a", "Answer", kind), library);
            assert_eq!(required_markers(&rendered, library), 0, "{library} {kind}: {rendered}");
        }
    }
}

#[test]
fn schema_entry___yup_required_email___chains_format_then_required() {
    let rendered = single(
        FieldDescriptor::new("e", "Email", FieldKind::Email).required(),
        ValidationLibrary::Yup,
    );

    assert_eq!(
        rendered,
        "  email: Yup.string().email('Invalid email address').required('Email is required'),\n"
    );
}

#[test]
fn schema_entry___zod_optional_text___is_optional() {
    let rendered = single(FieldDescriptor::new("n", "Nickname", FieldKind::Text), ValidationLibrary::Zod);

    assert!(rendered.contains("nickname: z.string().optional()"));
}

#[test]
fn schema_entry___zod_required_number___uses_required_error() {
    let rendered = single(
        FieldDescriptor::new("a", "Age", FieldKind::Number).required(),
        ValidationLibrary::Zod,
    );

    assert!(rendered.contains("z.coerce.number({ required_error: 'Age is required' })"));
    assert!(!rendered.contains(".optional()"));
}

#[test]
fn schema_entry___joi_optional_text___allows_empty() {
    let rendered = single(FieldDescriptor::new("n", "Notes", FieldKind::Textarea), ValidationLibrary::Joi);

    assert!(rendered.contains("notes: Joi.string().allow('')"));
}

#[test]
fn schema_entry___class_validator___renders_decorated_property() {
    let rendered = single(
        FieldDescriptor::new("a", "Age", FieldKind::Number)
            .with_rule(ValidationRule::new(RuleKind::Min).with_value(18.0)),
        ValidationLibrary::ClassValidator,
    );

    assert_eq!(
        rendered,
        "  @IsOptional()\n  @IsNumber()\n  @Min(18, { message: 'Must be at least 18' })\n  age?: number;\n"
    );
}

#[test_case(ValidationLibrary::Yup, ".max(50, 'Name must be at most 50 characters')"; "yup")]
#[test_case(ValidationLibrary::Zod, ".max(50, 'Name must be at most 50 characters')"; "zod")]
#[test_case(ValidationLibrary::Joi, ".max(50).message('Name must be at most 50 characters')"; "joi")]
#[test_case(ValidationLibrary::ClassValidator, "@MaxLength(50, { message: 'Name must be at most 50 characters' })"; "class validator")]
fn schema_entry___max_length___maps_per_library(library: ValidationLibrary, expected: &str) {
    let rendered = single(
        FieldDescriptor::new("n", "Name", FieldKind::Text)
            .with_rule(ValidationRule::new(RuleKind::MaxLength).with_value(50.0)),
        library,
    );

    assert!(rendered.contains(expected), "{rendered}");
}

#[test]
fn schema_entry___pattern_with_slash___is_escaped() {
    let rendered = single(
        FieldDescriptor::new("p", "Path", FieldKind::Text)
            .with_rule(ValidationRule::new(RuleKind::Pattern).with_value("^a/b$").with_message("Bad path")),
        ValidationLibrary::Yup,
    );

    assert!(rendered.contains(r".matches(/^a\/b$/, 'Bad path')"));
}

#[test]
fn schema_entry___length_rule_on_number___is_skipped() {
    let rendered = single(
        FieldDescriptor::new("a", "Age", FieldKind::Number)
            .with_rule(ValidationRule::new(RuleKind::MinLength).with_value(3.0)),
        ValidationLibrary::Yup,
    );

    assert_eq!(rendered, "  age: Yup.number(),\n");
}

#[test]
fn schema_entry___custom_rule___becomes_comment() {
    let rendered = single(
        FieldDescriptor::new("c", "Code", FieldKind::Text)
            .with_rule(ValidationRule::new(RuleKind::Custom).with_message("Checked\non the server")),
        ValidationLibrary::Yup,
    );

    assert!(rendered.starts_with("  // custom rule: Checked on the server\n"));
}

#[test]
fn schema_entry___phone_rule_on_text___adds_phone_format() {
    let rendered = single(
        FieldDescriptor::new("c", "Contact", FieldKind::Text).with_rule(ValidationRule::new(RuleKind::Phone)),
        ValidationLibrary::Zod,
    );

    assert!(rendered.contains(".regex(/^[0-9]{10}$/, 'Invalid phone number')"));
}

#[test]
fn emit_validation_schema___no_fields___renders_empty_object() {
    let plan = plan_of(Vec::new());

    assert_eq!(
        emit_validation_schema(&plan, ValidationLibrary::Yup),
        "const validationSchema = Yup.object({});\n"
    );
    assert_eq!(
        emit_validation_schema(&plan, ValidationLibrary::ClassValidator),
        "class FormValues {}\n"
    );
}

#[test]
fn emit_validation_schema___keeps_field_order() {
    let plan = plan_of(vec![
        FieldDescriptor::new("b", "Beta", FieldKind::Text),
        FieldDescriptor::new("a", "Alpha", FieldKind::Text),
    ]);

    let schema = emit_validation_schema(&plan, ValidationLibrary::Joi);

    let beta = schema.find("beta:").unwrap();
    let alpha = schema.find("alpha:").unwrap();
    assert!(beta < alpha);
    assert!(schema.starts_with("const validationSchema = Joi.object({\n"));
    assert!(schema.ends_with("});\n"));
}

#[test]
fn validation_import___class_validator___lists_used_decorators() {
    let plan = plan_of(vec![
        FieldDescriptor::new("e", "Email", FieldKind::Email).required(),
        FieldDescriptor::new("a", "Age", FieldKind::Number),
    ]);

    let import = validation_import(&plan, ValidationLibrary::ClassValidator, true);

    assert_eq!(
        import,
        "import { IsEmail, IsNotEmpty, IsNumber, IsOptional, validateSync } from 'class-validator';\n"
    );
}
