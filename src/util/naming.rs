//! Identifier casing and reserved-word handling for generated code.

use std::sync::LazyLock;

use regex::Regex;

/// Separators between words in introspected names (`get_size`, `new-with-label`).
static WORD_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\-\s]+").unwrap());

/// Go keywords.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// C keywords likely to show up as argument names.
const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Convert `new_with_label` to `NewWithLabel`.
///
/// Segments that are already mixed case keep their inner casing, so
/// `HTTPServer` stays `HTTPServer`.
pub fn to_pascal_case(name: &str) -> String {
    WORD_SEPARATOR
        .split(name)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Make `name` usable as a Go local identifier.
///
/// Keywords and names listed in `taken` get a trailing underscore.
pub fn go_identifier(name: &str, taken: &[&str]) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    while GO_KEYWORDS.contains(&ident.as_str()) || taken.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Make `name` usable as a C parameter name.
pub fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if C_KEYWORDS.contains(&ident.as_str()) || ident == "self" || ident == "error" {
        ident.push('_');
    }
    ident
}

/// Go package name for a namespace (`GObject` becomes `gobject`).
pub fn go_package_name(namespace: &str) -> String {
    namespace
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
