//! Identifier helpers shared by validation and code generation.

use regex::Regex;
use std::sync::OnceLock;

fn non_identifier_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_]").expect("static pattern"))
}

/// Strip every character that cannot appear in a JavaScript identifier.
pub fn sanitize_name(name: &str) -> String {
    non_identifier_chars().replace_all(name, "").into_owned()
}

/// `firstName` -> `FirstName`.
pub fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `MyButton` -> `myButton`.
pub fn lower_case_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
