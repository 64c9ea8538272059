#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("First Name", "first_name"; "spaces")]
#[test_case("firstName", "first_name"; "camel input")]
#[test_case("FirstName", "first_name"; "pascal input")]
#[test_case("e-mail address", "e_mail_address"; "hyphen")]
#[test_case("Address Line 2", "address_line_2"; "trailing digit")]
#[test_case("2nd Phone", "2nd_phone"; "leading digit")]
#[test_case("  Date of Birth!  ", "date_of_birth"; "padding and punctuation")]
#[test_case("", ""; "empty")]
#[test_case("!!!", ""; "symbols only")]
fn to_snake_case___converts(input: &str, expected: &str) {
    assert_eq!(to_snake_case(input), expected);
}

#[test_case("Customer Intake Form", "customer-intake-form"; "spaces")]
#[test_case("customerIntake", "customer-intake"; "camel input")]
#[test_case("snake_case_value", "snake-case-value"; "underscores")]
#[test_case("", ""; "empty")]
fn to_kebab_case___converts(input: &str, expected: &str) {
    assert_eq!(to_kebab_case(input), expected);
}

#[test_case("customer intake form", "CustomerIntakeForm"; "spaces")]
#[test_case("Customer Intake Form!", "CustomerIntakeForm"; "punctuation dropped")]
#[test_case("firstName", "FirstName"; "inner capitals kept")]
#[test_case("first_name", "FirstName"; "underscores")]
#[test_case("2nd phone", "2ndPhone"; "leading digit")]
#[test_case("", ""; "empty")]
fn to_pascal_case___converts(input: &str, expected: &str) {
    assert_eq!(to_pascal_case(input), expected);
}

#[test_case("First Name", "firstName"; "spaces")]
#[test_case("Email Address", "emailAddress"; "two words")]
#[test_case("Age", "age"; "single word")]
#[test_case("HTML Parser", "htmlParser"; "acronym word")]
#[test_case("HTMLParser", "htmlParser"; "acronym prefix")]
#[test_case("ID", "id"; "acronym only")]
#[test_case("2nd phone", "2ndPhone"; "leading digit")]
#[test_case("@@", ""; "symbols only")]
fn to_camel_case___converts(input: &str, expected: &str) {
    assert_eq!(to_camel_case(input), expected);
}

#[test]
fn to_camel_case___output_contains_only_alphanumerics() {
    let out = to_camel_case("Phone # (mobile) / work");

    assert_eq!(out, "phoneMobileWork");
    assert!(out.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn to_snake_case___non_ascii_letters_separate_words() {
    assert_eq!(to_snake_case("caf\u{e9} name"), "caf_name");
}
