#![allow(non_snake_case)]

use super::*;

fn rule(kind: RuleKind, value: f64) -> ValidationRule {
    ValidationRule::new(kind).with_value(value)
}

// FieldKind tests

#[test]
fn FieldKind___parse___accepts_tags_case_insensitively() {
    assert_eq!(FieldKind::parse("TEXT"), Some(FieldKind::Text));
    assert_eq!(FieldKind::parse("email"), Some(FieldKind::Email));
    assert_eq!(FieldKind::parse("multi-select"), Some(FieldKind::MultiSelect));
    assert_eq!(FieldKind::parse("MULTI_SELECT"), Some(FieldKind::MultiSelect));
}

#[test]
fn FieldKind___parse___rejects_unknown_tags() {
    assert_eq!(FieldKind::parse("SIGNATURE"), None);
    assert_eq!(FieldKind::parse(""), None);
}

#[test]
fn FieldKind___as_str___roundtrips_through_parse() {
    for kind in FieldKind::ALL {
        assert_eq!(FieldKind::parse(kind.as_str()), Some(kind));
    }
}

#[test]
fn FieldKind___has_choices___only_for_selection_kinds() {
    let with_choices: Vec<_> = FieldKind::ALL
        .into_iter()
        .filter(FieldKind::has_choices)
        .collect();

    assert_eq!(
        with_choices,
        vec![FieldKind::Radio, FieldKind::Select, FieldKind::MultiSelect]
    );
}

#[test]
fn FieldKind___serde___uses_screaming_snake_case() {
    let json = serde_json::to_string(&FieldKind::MultiSelect).unwrap();

    assert_eq!(json, "\"MULTI_SELECT\"");
}

// RuleValue tests

#[test]
fn RuleValue___display___renders_integral_numbers_without_fraction() {
    assert_eq!(RuleValue::Number(10.0).to_string(), "10");
    assert_eq!(RuleValue::Number(2.5).to_string(), "2.5");
    assert_eq!(RuleValue::Text("abc".into()).to_string(), "abc");
}

#[test]
fn RuleValue___as_usize___rejects_negative_and_fractional() {
    assert_eq!(RuleValue::Number(3.0).as_usize(), Some(3));
    assert_eq!(RuleValue::Text("7".into()).as_usize(), Some(7));
    assert_eq!(RuleValue::Number(-1.0).as_usize(), None);
    assert_eq!(RuleValue::Number(1.5).as_usize(), None);
    assert_eq!(RuleValue::Bool(true).as_usize(), None);
}

#[test]
fn ValidationRule___deserialize___accepts_editor_type_key() {
    let json = r#"{"type": "minLength", "value": 3, "message": "Too short"}"#;

    let rule: ValidationRule = serde_json::from_str(json).unwrap();

    assert_eq!(rule.kind, RuleKind::MinLength);
    assert_eq!(rule.value, Some(RuleValue::Number(3.0)));
    assert_eq!(rule.message(), Some("Too short"));
}

#[test]
fn ValidationRule___message___treats_blank_as_absent() {
    let rule = ValidationRule::new(RuleKind::Required).with_message("  ");

    assert_eq!(rule.message(), None);
}

// FieldDescriptor tests

#[test]
fn FieldDescriptor___is_required___honours_required_rule() {
    let field = FieldDescriptor::new("f1", "Name", FieldKind::Text)
        .with_rule(ValidationRule::new(RuleKind::Required));

    assert!(!field.required);
    assert!(field.is_required());
}

#[test]
fn FieldDescriptor___choices___empty_for_text_kinds() {
    let field = FieldDescriptor::new("f1", "Name", FieldKind::Text)
        .with_options([FieldOption::new("A", "a")]);

    assert!(field.choices().is_empty());
}

#[test]
fn FieldDescriptor___choices___returned_for_select() {
    let field = FieldDescriptor::new("f1", "Country", FieldKind::Select)
        .with_options([FieldOption::new("A", "a"), FieldOption::new("B", "b")]);

    assert_eq!(field.choices().len(), 2);
}

#[test]
fn FieldDescriptor___numeric_bounds___hidden_for_text_kinds() {
    let mut field = FieldDescriptor::new("f1", "Name", FieldKind::Text);
    field.bounds = Some(NumericBounds {
        min: Some(1.0),
        ..Default::default()
    });

    assert!(field.numeric_bounds().is_none());
}

#[test]
fn FieldDescriptor___effective_rules___last_rule_of_a_kind_wins() {
    let field = FieldDescriptor::new("f1", "Name", FieldKind::Text)
        .with_rule(rule(RuleKind::MaxLength, 50.0))
        .with_rule(rule(RuleKind::MinLength, 2.0))
        .with_rule(rule(RuleKind::MaxLength, 20.0));

    let effective = field.effective_rules();

    assert_eq!(effective.len(), 2);
    assert_eq!(effective[0].kind, RuleKind::MinLength);
    assert_eq!(effective[1].kind, RuleKind::MaxLength);
    assert_eq!(effective[1].value, Some(RuleValue::Number(20.0)));
}

#[test]
fn FieldDescriptor___effective_rules___is_stable_across_calls() {
    let field = FieldDescriptor::new("f1", "Name", FieldKind::Text)
        .with_rule(rule(RuleKind::MaxLength, 50.0))
        .with_rule(rule(RuleKind::MaxLength, 20.0));

    assert_eq!(field.effective_rules(), field.effective_rules());
}

#[test]
fn FieldDescriptor___conflicting_rule_kinds___lists_each_duplicate_once() {
    let field = FieldDescriptor::new("f1", "Name", FieldKind::Text)
        .with_rule(rule(RuleKind::MaxLength, 50.0))
        .with_rule(rule(RuleKind::MaxLength, 40.0))
        .with_rule(rule(RuleKind::MaxLength, 30.0))
        .with_rule(rule(RuleKind::MinLength, 1.0));

    assert_eq!(field.conflicting_rule_kinds(), vec![RuleKind::MaxLength]);
}

#[test]
fn FieldDescriptor___rule___returns_last_of_kind() {
    let field = FieldDescriptor::new("f1", "Age", FieldKind::Number)
        .with_rule(rule(RuleKind::Min, 1.0))
        .with_rule(rule(RuleKind::Min, 18.0));

    let min = field.rule(RuleKind::Min).unwrap();

    assert_eq!(min.value, Some(RuleValue::Number(18.0)));
}

// FormStructure tests

#[test]
fn FormStructure___with_field___assigns_sequential_order() {
    let structure = FormStructure::new("Test")
        .with_field(FieldDescriptor::new("a", "A", FieldKind::Text))
        .with_field(FieldDescriptor::new("b", "B", FieldKind::Text));

    assert_eq!(structure.fields[0].order, 0);
    assert_eq!(structure.fields[1].order, 1);
    assert_eq!(structure.position_of("b"), Some(1));
    assert_eq!(structure.position_of("c"), None);
}

#[test]
fn FormStructure___validate___rejects_duplicate_ids() {
    let structure = FormStructure::new("Test")
        .with_field(FieldDescriptor::new("a", "A", FieldKind::Text))
        .with_field(FieldDescriptor::new("a", "B", FieldKind::Text));

    let err = structure.validate().unwrap_err();

    assert!(matches!(err, GenerationError::InvalidStructure(_)));
    assert!(err.to_string().contains("duplicate field id 'a'"));
}

#[test]
fn FormStructure___validate___rejects_empty_ids() {
    let structure =
        FormStructure::new("Test").with_field(FieldDescriptor::new(" ", "A", FieldKind::Text));

    assert!(structure.validate().is_err());
}

#[test]
fn FormStructure___from_json___parses_minimal_document() {
    let json = r#"{
        "title": "Intake",
        "fields": [
            {"id": "f1", "label": "Full Name", "kind": "TEXT", "required": true}
        ]
    }"#;

    let structure = FormStructure::from_json(json).unwrap();

    assert_eq!(structure.title.as_deref(), Some("Intake"));
    assert_eq!(structure.fields.len(), 1);
    assert_eq!(structure.fields[0].kind, FieldKind::Text);
    assert!(structure.fields[0].required);
}
