#![allow(non_snake_case)]

use super::*;
use formforge_core::{ConditionalRule, FieldDescriptor, GenerationError};
use test_case::test_case;

fn text(id: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(id, label, FieldKind::Text)
}

fn plan(structure: &FormStructure) -> (FormPlan, Vec<GenerationWarning>) {
    FormPlan::build(structure, "Demo").unwrap()
}

#[test_case("Customer Intake Form!", "CustomerIntakeForm", "customer_intake_form", "customer-intake-form"; "punctuated")]
#[test_case("  job application ", "JobApplication", "job_application", "job-application"; "padded")]
#[test_case("", "Generated", "generated", "generated"; "empty")]
#[test_case("!!!", "Generated", "generated", "generated"; "symbols only")]
#[test_case("2024 Survey", "Form2024Survey", "form2024_survey", "form2024-survey"; "leading digit")]
fn ProjectNames___new___derives_every_casing(input: &str, pascal: &str, snake: &str, kebab: &str) {
    let names = ProjectNames::new(input);

    assert_eq!(names.pascal, pascal);
    assert_eq!(names.snake, snake);
    assert_eq!(names.kebab, kebab);
    assert_eq!(names.component(), format!("{pascal}Form"));
}

#[test]
fn FormPlan___build___derives_all_identifier_casings() {
    let structure = FormStructure::new("T").with_field(text("f1", "Full Name"));

    let (plan, warnings) = plan(&structure);

    assert!(warnings.is_empty());
    let field = &plan.fields[0];
    assert_eq!(field.ident, "fullName");
    assert_eq!(field.pascal, "FullName");
    assert_eq!(field.column, "full_name");
}

#[test]
fn FormPlan___duplicate_labels___get_numeric_suffixes() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "Email"))
        .with_field(text("b", "email"))
        .with_field(text("c", "E-mail!"));

    let (plan, _) = plan(&structure);

    let idents: Vec<_> = plan.fields.iter().map(|f| f.ident.as_str()).collect();
    assert_eq!(idents, vec!["email", "email2", "eMail2"]);
}

#[test]
fn FormPlan___snake_collision___is_resolved() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "foo bar"))
        .with_field(text("b", "foo BAR"));

    let (plan, _) = plan(&structure);

    let columns: HashSet<_> = plan.fields.iter().map(|f| f.column.as_str()).collect();
    assert_eq!(columns.len(), 2);
}

#[test_case("ID"; "id")]
#[test_case("Created At"; "created at")]
#[test_case("is deleted"; "is deleted")]
fn FormPlan___reserved_name___is_suffixed(label: &str) {
    let structure = FormStructure::new("T").with_field(text("a", label));

    let (plan, _) = plan(&structure);

    assert!(plan.fields[0].ident.ends_with('2'));
}

#[test_case("Demo", "demo2", "Demo2"; "entity class")]
#[test_case("Demo Dto", "demoDto2", "DemoDto2"; "dto class")]
#[test_case("create demo dto", "createDemoDto2", "CreateDemoDto2"; "create dto class")]
#[test_case("Demo Notes", "demoNotes", "DemoNotes"; "unrelated")]
fn FormPlan___label_matching_class_name___is_suffixed(label: &str, ident: &str, pascal: &str) {
    let structure = FormStructure::new("T").with_field(text("a", label));

    let (plan, _) = plan(&structure);

    assert_eq!(plan.fields[0].ident, ident);
    assert_eq!(plan.fields[0].pascal, pascal);
}

#[test]
fn FormPlan___digit_or_empty_label___is_prefixed() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "2nd Phone"))
        .with_field(text("x9", "???"));

    let (plan, _) = plan(&structure);

    assert_eq!(plan.fields[0].ident, "field2ndPhone");
    assert_eq!(plan.fields[1].ident, "fieldX9");
}

#[test]
fn FormPlan___duplicate_rules___warn_and_keep_last() {
    let structure = FormStructure::new("T").with_field(
        text("a", "Name")
            .with_rule(ValidationRule::new(RuleKind::MaxLength).with_value(10.0))
            .with_rule(ValidationRule::new(RuleKind::MaxLength).with_value(20.0)),
    );

    let (plan, warnings) = plan(&structure);

    assert_eq!(
        warnings,
        vec![GenerationWarning::RuleConflict {
            field_id: "a".to_string(),
            rule: RuleKind::MaxLength,
        }]
    );
    let rule = plan.fields[0].rule(RuleKind::MaxLength).unwrap();
    assert_eq!(rule.value, Some(RuleValue::Number(20.0)));
}

#[test]
fn FormPlan___required_rule___marks_field_and_supplies_message() {
    let structure = FormStructure::new("T").with_field(
        text("a", "Name").with_rule(ValidationRule::new(RuleKind::Required).with_message("Name please")),
    );

    let (plan, _) = plan(&structure);

    let field = &plan.fields[0];
    assert!(field.required);
    assert!(field.rule(RuleKind::Required).is_none());
    assert_eq!(field.required_message(), "Name please");
}

#[test]
fn PlannedField___required_message___defaults_to_label() {
    let structure = FormStructure::new("T").with_field(text("a", "Name").required());

    let (plan, _) = plan(&structure);

    assert_eq!(plan.fields[0].required_message(), "Name is required");
}

#[test]
fn FormPlan___condition___resolves_source_identifier() {
    let structure = FormStructure::new("T")
        .with_field(FieldDescriptor::new("a", "Has Pet", FieldKind::Checkbox))
        .with_field(text("b", "Pet Name").with_conditional(ConditionalRule {
            action: Visibility::Show,
            source_field_id: "a".to_string(),
            operator: ConditionOperator::Equals,
            value: RuleValue::Bool(true),
        }));

    let (plan, warnings) = plan(&structure);

    assert!(warnings.is_empty());
    let condition = plan.fields[1].condition.as_ref().unwrap();
    assert_eq!(condition.source_ident, "hasPet");
    assert_eq!(condition.source_kind, FieldKind::Checkbox);
    assert!(plan.has_conditions());
}

#[test]
fn FormPlan___forward_condition___is_dropped() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "A").with_conditional(ConditionalRule {
            action: Visibility::Hide,
            source_field_id: "b".to_string(),
            operator: ConditionOperator::Equals,
            value: RuleValue::from("x"),
        }))
        .with_field(text("b", "B"));

    let (plan, warnings) = plan(&structure);

    assert_eq!(warnings.len(), 1);
    assert!(plan.fields[0].condition.is_none());
    assert!(!plan.has_conditions());
}

#[test]
fn FormPlan___duplicate_ids___fail() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "A"))
        .with_field(text("a", "B"));

    let err = FormPlan::build(&structure, "Demo").unwrap_err();

    assert!(matches!(err, GenerationError::InvalidStructure(_)));
}

#[test]
fn FormPlan___options_only_kept_for_choice_kinds() {
    let structure = FormStructure::new("T")
        .with_field(text("a", "A").with_options([FieldOption::new("X", "x")]))
        .with_field(
            FieldDescriptor::new("b", "B", FieldKind::Select).with_options([FieldOption::new("X", "x")]),
        );

    let (plan, _) = plan(&structure);

    assert!(plan.fields[0].options.is_empty());
    assert_eq!(plan.fields[1].options.len(), 1);
}
