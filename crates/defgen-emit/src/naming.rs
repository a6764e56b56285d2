//! Identifier conversion between schema names and Rust names.
//!
//! Schema names are camelCase (properties, commands, events) or PascalCase
//! (domains, types). Generated Rust uses snake_case items and PascalCase
//! types, with raw identifiers for names that collide with keywords.

/// Convert a schema name to snake_case.
///
/// Uppercase runs are kept together: `frameURL` becomes `frame_url`,
/// `IOStream` becomes `io_stream`. Separators (`-`, `.`, space) become
/// underscores.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => {
                    next.is_some_and(|n| n.is_ascii_lowercase())
                }
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' || c == '.' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a snake_case identifier back to camelCase, for checking whether
/// a field needs an explicit wire rename.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a schema name to PascalCase.
///
/// Non-alphanumeric characters separate words; the first letter of each
/// word is uppercased and the rest kept as written.
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            word_start = true;
        } else if word_start {
            out.push(c.to_ascii_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Make an enum variant identifier from a wire literal.
///
/// Literals that reduce to nothing become `Empty`; literals starting with
/// a digit are prefixed with `N`.
pub fn variant_ident(literal: &str) -> String {
    let pascal = pascal_case(literal);
    if pascal.is_empty() {
        "Empty".to_string()
    } else if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("N{pascal}")
    } else {
        pascal
    }
}

/// Keywords that may be used as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe",
    "use", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers at all.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// A schema name converted to a Rust item identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// The identifier text, possibly `r#`-prefixed or `_`-suffixed.
    pub text: String,
    /// The plain snake_case name before keyword escaping.
    pub plain: String,
}

/// Convert a schema name to a snake_case Rust identifier, escaping
/// keywords.
pub fn item_ident(name: &str) -> Ident {
    let plain = snake_case(name);
    let text = if RAW_KEYWORDS.contains(&plain.as_str()) {
        format!("r#{plain}")
    } else if RESERVED.contains(&plain.as_str()) {
        format!("{plain}_")
    } else {
        plain.clone()
    };
    Ident { text, plain }
}

/// Whether a field identifier round-trips to its wire name under the
/// struct-level camelCase rename, or needs an explicit rename attribute.
pub fn needs_explicit_rename(wire_name: &str, ident: &Ident) -> bool {
    ident.text.ends_with('_') || camel_case(&ident.plain) != wire_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_camel_names() {
        assert_eq!(snake_case("lineNumber"), "line_number");
        assert_eq!(snake_case("setBreakpointByUrl"), "set_breakpoint_by_url");
        assert_eq!(snake_case("url"), "url");
    }

    #[test]
    fn snake_case_pascal_names() {
        assert_eq!(snake_case("Debugger"), "debugger");
        assert_eq!(snake_case("DOM"), "dom");
        assert_eq!(snake_case("IndexedDB"), "indexed_db");
        assert_eq!(snake_case("IOStream"), "io_stream");
    }

    #[test]
    fn snake_case_keeps_uppercase_runs_together() {
        assert_eq!(snake_case("frameURL"), "frame_url");
        assert_eq!(snake_case("enableHTTP2"), "enable_http2");
    }

    #[test]
    fn camel_case_round_trip() {
        assert_eq!(camel_case("line_number"), "lineNumber");
        assert_eq!(camel_case("url"), "url");
        // Acronym casing is lost; callers must emit an explicit rename.
        assert_eq!(camel_case(&snake_case("frameURL")), "frameUrl");
    }

    #[test]
    fn pascal_case_command_and_literal_names() {
        assert_eq!(pascal_case("setBreakpointByUrl"), "SetBreakpointByUrl");
        assert_eq!(pascal_case("scriptParsed"), "ScriptParsed");
        assert_eq!(pascal_case("portrait-primary"), "PortraitPrimary");
        assert_eq!(pascal_case("function breakpoint"), "FunctionBreakpoint");
    }

    #[test]
    fn variant_ident_handles_awkward_literals() {
        assert_eq!(variant_ident("any"), "Any");
        assert_eq!(variant_ident("-Infinity"), "Infinity");
        assert_eq!(variant_ident("-0"), "N0");
        assert_eq!(variant_ident("2g"), "N2g");
        assert_eq!(variant_ident("--"), "Empty");
    }

    #[test]
    fn item_ident_escapes_keywords() {
        assert_eq!(item_ident("type").text, "r#type");
        assert_eq!(item_ident("continue").text, "r#continue");
        assert_eq!(item_ident("self").text, "self_");
        assert_eq!(item_ident("lineNumber").text, "line_number");
    }

    #[test]
    fn explicit_rename_only_when_round_trip_fails() {
        assert!(!needs_explicit_rename("lineNumber", &item_ident("lineNumber")));
        assert!(!needs_explicit_rename("type", &item_ident("type")));
        assert!(needs_explicit_rename("frameURL", &item_ident("frameURL")));
        assert!(needs_explicit_rename("self", &item_ident("self")));
    }
}
