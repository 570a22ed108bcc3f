//! Text helpers shared by the page and search layers.

use crate::markup::{Token, tokenize};
use std::borrow::Cow;

/// Reverses HTML entity escaping.
///
/// # Examples
///
/// ```
/// use mdsite_core::text::unescape;
///
/// assert_eq!(unescape("&amp; &lt; &gt; &#39; &#x27; &quot;"), "& < > ' ' \"");
/// ```
pub fn unescape(s: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(s)
}

/// Flattens markup to plain text for indexing.
///
/// Every tag becomes a space, entities are decoded, runs of whitespace are
/// collapsed to one space and the result is trimmed.
pub fn flatten_markup(html: &str) -> String {
    let mut spaced = String::with_capacity(html.len());
    for token in tokenize(html) {
        match token {
            Token::Text(text) => spaced.push_str(text),
            _ => spaced.push(' '),
        }
    }
    collapse_whitespace(&unescape(&spaced))
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts an identifier to kebab-case, splitting before every uppercase letter.
///
/// # Examples
///
/// ```
/// use mdsite_core::text::kebab_case;
///
/// assert_eq!(kebab_case("VarButton"), "var-button");
/// assert_eq!(kebab_case("Cell"), "cell");
/// ```
pub fn kebab_case(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    spaced.trim().split(' ').collect::<Vec<_>>().join("-").to_lowercase()
}
