//! Identifier case conversions.
//!
//! Every function is total: any input, including the empty string or a
//! string made only of symbols, produces a (possibly empty) identifier.
//! Only ASCII letters and digits survive; everything else separates words.
//!
//! All four conversions are idempotent on their own output.

/// Split into alphanumeric words.
///
/// With `split_case`, a lowercase letter or digit followed by an uppercase
/// letter also starts a new word (`firstName` -> `first`, `Name`).
fn words(input: &str, split_case: bool) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        let boundary = split_case
            && ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        current.push(ch);
        prev = Some(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn join_lower(input: &str, separator: &str) -> String {
    words(input, true)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `"First Name"` -> `"first_name"`, `"firstName"` -> `"first_name"`.
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    join_lower(input, "_")
}

/// `"First Name"` -> `"first-name"`.
#[must_use]
pub fn to_kebab_case(input: &str) -> String {
    join_lower(input, "-")
}

/// `"first name"` -> `"FirstName"`.
///
/// The first character of each word is upper-cased; the rest is kept as is,
/// so `"firstName"` becomes `"FirstName"`.
#[must_use]
pub fn to_pascal_case(input: &str) -> String {
    words(input, false)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `"First Name"` -> `"firstName"`, `"HTML Parser"` -> `"htmlParser"`.
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let chars: Vec<char> = pascal.chars().collect();

    let run = chars.iter().take_while(|c| c.is_ascii_uppercase()).count();
    // A capital run followed by lowercase letters keeps its last capital,
    // which begins the next word.
    let lower_upto = match run {
        0 => 0,
        1 => 1,
        n if chars.get(n).is_some_and(|c| c.is_ascii_lowercase()) => n - 1,
        n => n,
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < lower_upto { c.to_ascii_lowercase() } else { *c })
        .collect()
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
