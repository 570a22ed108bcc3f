//! Playground annotations for highlighted code samples.
//!
//! Every `<pre class="hljs">` block is wrapped in a code-example tag. A sample
//! whose source carries an ignore marker comment gets the ignore attribute,
//! and the marker line itself is removed from the rendered block.

use crate::options::PageOptions;
use mdsite_core::{Token, inner_text, tokenize, unescape};

/// Wraps every highlighted block in `html` in a code-example tag.
pub fn annotate_code_examples(html: &str, options: &PageOptions) -> String {
    let markers = marker_encodings(&options.ignore_attribute);
    let tokens = tokenize(html);
    let mut out = String::with_capacity(html.len() + 128);
    let mut i = 0;

    while i < tokens.len() {
        let is_highlighted = tokens[i]
            .start_named("pre")
            .is_some_and(|tag| tag.has_class("hljs"));
        let close = if is_highlighted {
            tokens[i + 1..]
                .iter()
                .position(|token| token.is_end_of("pre"))
                .map(|offset| i + 1 + offset)
        } else {
            None
        };

        let Some(close) = close else {
            out.push_str(tokens[i].raw());
            i += 1;
            continue;
        };

        let block: String = tokens[i..=close].iter().map(Token::raw).collect();
        let (block, ignored) = strip_markers(&block, &markers);
        let tag = &options.code_example_tag;
        if ignored {
            out.push_str(&format!(
                "<{tag} {attr}>{block}</{tag}>",
                attr = options.ignore_attribute
            ));
        } else {
            out.push_str(&format!("<{tag}>{block}</{tag}>"));
        }
        i = close + 1;
    }
    out
}

/// Comment forms of the marker for C-like, shell, block-comment and markup
/// languages.
fn marker_encodings(marker: &str) -> [String; 4] {
    [
        format!("// {marker}"),
        format!("# {marker}"),
        format!("/* {marker} */"),
        format!("<!-- {marker} -->"),
    ]
}

/// Removes marker lines from a highlighted block.
///
/// Only the text and newline of a marker line go away; its tags stay so
/// spans opened on that line still close.
fn strip_markers(block: &str, markers: &[String]) -> (String, bool) {
    let mut out = String::with_capacity(block.len());
    let mut found = false;

    for line in block.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        let visible = inner_text(content);
        let visible = unescape(&visible);
        if !markers.iter().any(|marker| marker == visible.trim()) {
            out.push_str(line);
            continue;
        }

        found = true;
        for token in tokenize(content) {
            if !matches!(token, Token::Text(_)) {
                out.push_str(token.raw());
            }
        }
    }
    (out, found)
}
