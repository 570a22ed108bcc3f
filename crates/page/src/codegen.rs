//! Page component code generation.
//!
//! Assembles the transformed body, the hoisted imports and the component
//! registry into a single-file page component.

use mdsite_core::kebab_case;
use std::fmt::Write as FmtWrite;

/// Converts a Rust string to a JavaScript string literal.
///
/// Uses JSON serialization to properly escape special characters.
///
/// # Examples
///
/// ```
/// use mdsite_page::codegen::js_string_literal;
///
/// assert_eq!(js_string_literal("hello"), "\"hello\"");
/// assert_eq!(js_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn js_string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Converts a Rust string to a single-quoted JavaScript string literal.
///
/// # Examples
///
/// ```
/// use mdsite_page::codegen::js_single_quoted;
///
/// assert_eq!(js_single_quoted("en-US"), "'en-US'");
/// assert_eq!(js_single_quoted("it's \"x\""), "'it\\'s \"x\"'");
/// ```
pub fn js_single_quoted(value: &str) -> String {
    let double = js_string_literal(value);
    let inner = &double[1..double.len() - 1];
    let mut out = String::with_capacity(inner.len() + 2);
    out.push('\'');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Builds the `components: { … }` registry entries, one per line.
///
/// # Examples
///
/// ```
/// use mdsite_page::codegen::component_registry;
///
/// let components = vec!["BasicUsage".to_string(), "Theme".to_string()];
/// assert_eq!(
///     component_registry(&components),
///     "    'basic-usage': BasicUsage,\n    'theme': Theme"
/// );
/// ```
pub fn component_registry(components: &[String]) -> String {
    components
        .iter()
        .map(|symbol| format!("    '{}': {}", kebab_case(symbol), symbol))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Assembles the final page component.
///
/// The body is placed inside `<div class="{doc_class}">` in the template; the
/// script re-emits `imports` verbatim and registers `components` under their
/// kebab-case tag names.
pub fn assemble_page(
    body: &str,
    doc_class: &str,
    imports: &[String],
    components: &[String],
) -> String {
    let mut out = String::with_capacity(body.len() + 256);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "<template><div class=\"{}\">{}</div></template>",
        doc_class, body
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "<script>");
    let _ = writeln!(out, "{}", imports.join("\n"));
    let _ = writeln!(out);
    let _ = writeln!(out, "export default {{");
    let _ = writeln!(out, "  components: {{");
    if !components.is_empty() {
        let _ = writeln!(out, "{}", component_registry(components));
    }
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out, "</script>");
    out
}
