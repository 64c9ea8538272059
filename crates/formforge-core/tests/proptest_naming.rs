//! Property-based tests for the identifier case conversions.

#![allow(non_snake_case)]

use formforge_core::naming::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 _\\-]{0,32}",
        "[a-zA-Z]{1,8}( [a-zA-Z0-9]{1,8}){0,4}",
        ".{0,24}",
    ]
}

proptest! {
    #[test]
    fn snake_case___is_idempotent(s in label()) {
        let once = to_snake_case(&s);
        prop_assert_eq!(to_snake_case(&once), once);
    }

    #[test]
    fn kebab_case___is_idempotent(s in label()) {
        let once = to_kebab_case(&s);
        prop_assert_eq!(to_kebab_case(&once), once);
    }

    #[test]
    fn pascal_case___is_idempotent(s in label()) {
        let once = to_pascal_case(&s);
        prop_assert_eq!(to_pascal_case(&once), once);
    }

    #[test]
    fn camel_case___is_idempotent(s in label()) {
        let once = to_camel_case(&s);
        prop_assert_eq!(to_camel_case(&once), once);
    }

    #[test]
    fn all_cases___emit_only_ascii_alphanumerics_and_separators(s in label()) {
        prop_assert!(to_camel_case(&s).chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(to_pascal_case(&s).chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(to_snake_case(&s).chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert!(to_kebab_case(&s).chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn snake_and_kebab___differ_only_in_separator(s in label()) {
        prop_assert_eq!(to_snake_case(&s).replace('_', "-"), to_kebab_case(&s));
    }

    #[test]
    fn camel_case___never_starts_with_uppercase(s in label()) {
        let camel = to_camel_case(&s);
        prop_assert!(!camel.starts_with(|c: char| c.is_ascii_uppercase()));
    }
}
