//! Live-preview extraction.
//!
//! Fenced blocks in a preview language (```` ```vue ````) are not shown as
//! code. Their import lines name components that are rendered live instead:
//! the block is replaced by a container holding one placeholder tag per
//! imported symbol, and the imports are hoisted into the page script.

use crate::options::PageOptions;
use mdsite_core::{
    FenceEvent, FenceState, ParseDiagnostics, ParseWarning, SourceLocation, advance_fence_state,
    fence_language, kebab_case,
};

/// Result of extracting live-preview blocks from a markdown document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedComponents {
    /// Markdown with every preview block replaced.
    pub source: String,
    /// Distinct import statements, in first-seen order.
    pub imports: Vec<String>,
    /// Distinct imported symbols, in first-seen order.
    pub components: Vec<String>,
    /// Unterminated preview fences.
    pub diagnostics: ParseDiagnostics,
}

/// An import line found inside a preview block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportLine<'a> {
    /// Imported symbol (`Button` in `import Button from './Button.vue'`).
    pub symbol: &'a str,
    /// Statement text from `import` through the closing quote.
    pub statement: &'a str,
}

/// Replaces every live-preview block in `source`.
pub fn extract_components(source: &str, options: &PageOptions) -> ExtractedComponents {
    let mut out = String::with_capacity(source.len());
    let mut imports: Vec<String> = Vec::new();
    let mut components: Vec<String> = Vec::new();
    let mut diagnostics = ParseDiagnostics::new();

    let mut state = FenceState::default();
    // (line number of the opener, raw text captured so far)
    let mut capture: Option<(usize, String)> = None;

    for (idx, line) in source.split_inclusive('\n').enumerate() {
        let outcome = advance_fence_state(line, state);
        state = outcome.next_state;

        if let Some((_, raw)) = capture.as_mut() {
            raw.push_str(line);
            if outcome.event == FenceEvent::Closed {
                let (_, raw) = capture.take().unwrap_or_default();
                let body = block_body(&raw);
                out.push_str(&replace_block(
                    body,
                    options,
                    &mut imports,
                    &mut components,
                ));
                out.push_str(line_ending(line));
            }
            continue;
        }

        if outcome.event == FenceEvent::Opened
            && fence_language(line).is_some_and(|lang| options.is_preview_language(lang))
        {
            capture = Some((idx + 1, line.to_string()));
            continue;
        }

        out.push_str(line);
    }

    if let Some((line_no, raw)) = capture {
        let opener = raw.lines().next().unwrap_or_default().trim().to_string();
        diagnostics.add_warning(ParseWarning::UnclosedCodeFence {
            location: SourceLocation::new(line_no, 1),
            marker: state.marker.unwrap_or('`'),
            context: opener,
        });
        out.push_str(&raw);
    }

    ExtractedComponents {
        source: out,
        imports,
        components,
        diagnostics,
    }
}

/// Strips the opening and closing fence lines from a captured block.
fn block_body(raw: &str) -> &str {
    let after_opener = raw.find('\n').map_or("", |pos| &raw[pos + 1..]);
    let without_newline = after_opener.trim_end_matches(['\n', '\r']);
    match without_newline.rfind('\n') {
        Some(pos) => &after_opener[..pos + 1],
        None => "",
    }
}

fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn replace_block(
    body: &str,
    options: &PageOptions,
    imports: &mut Vec<String>,
    components: &mut Vec<String>,
) -> String {
    let mut placeholders: Vec<String> = Vec::new();
    let mut block_symbols: Vec<&str> = Vec::new();

    for line in body.lines() {
        let Some(import) = parse_import_line(line) else {
            continue;
        };
        let statement = import.statement.trim_end_matches('\r');
        if !imports.iter().any(|existing| existing == statement) {
            imports.push(statement.to_string());
        }
        if !components.iter().any(|existing| existing == import.symbol) {
            components.push(import.symbol.to_string());
        }
        if !block_symbols.contains(&import.symbol) {
            block_symbols.push(import.symbol);
            placeholders.push(format!("<{} />", kebab_case(import.symbol)));
        }
    }

    if placeholders.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"{}\">{}</div>",
        options.preview_class,
        placeholders.join("\n")
    )
}

/// Finds `import <symbol> from '<module>'` on a single line.
///
/// The symbol extends to the last ` from ` that is followed by a quoted
/// module, and the statement ends at the last quote on the line.
pub fn parse_import_line(line: &str) -> Option<ImportLine<'_>> {
    for (start, _) in line.match_indices("import ") {
        let after_keyword = start + "import ".len();
        let rest = &line[after_keyword..];

        for (from_pos, _) in rest.rmatch_indices(" from ") {
            if from_pos == 0 {
                continue;
            }
            let tail = &rest[from_pos + " from ".len()..];
            if !tail.starts_with(['\'', '"']) {
                continue;
            }
            let module = &tail[1..];
            let Some(close) = module.rfind(['\'', '"']) else {
                continue;
            };
            if close == 0 {
                continue;
            }
            let end = after_keyword + from_pos + " from ".len() + 1 + close + 1;
            return Some(ImportLine {
                symbol: &rest[..from_pos],
                statement: &line[start..end],
            });
        }
    }
    None
}
