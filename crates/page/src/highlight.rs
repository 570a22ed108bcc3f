//! Syntax highlighting plugin used by the renderer for fenced code.

use mdsite_core::DocsError;
use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Highlights a code sample into HTML.
///
/// `Ok(None)` means the language is unknown; the renderer then falls back to
/// a plain, unwrapped code block.
pub trait Highlighter {
    /// Highlight `code` written in `lang`.
    fn highlight(&self, code: &str, lang: &str) -> Result<Option<String>, DocsError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Result<Option<String>, DocsError>,
{
    fn highlight(&self, code: &str, lang: &str) -> Result<Option<String>, DocsError> {
        (self)(code, lang)
    }
}

/// Highlighter that never recognizes a language.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlight;

impl Highlighter for NoHighlight {
    fn highlight(&self, _code: &str, _lang: &str) -> Result<Option<String>, DocsError> {
        Ok(None)
    }
}

static DEFAULT_SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Class prefix applied to every highlighted span.
const CLASS_PREFIX: &str = "hljs-";

/// Fence languages missing from the bundled syntax set, mapped to the
/// closest bundled grammar.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("shell", "sh"),
    ("console", "sh"),
    ("ts", "js"),
    ("typescript", "js"),
    ("tsx", "js"),
    ("jsx", "js"),
    ("vue", "html"),
    ("scss", "css"),
    ("less", "css"),
];

fn alias_of(lang: &str) -> Option<&'static str> {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(lang))
        .map(|&(_, target)| target)
}

/// syntect-backed highlighter emitting class-based spans (`hljs-…`).
pub struct SyntectHighlighter {
    syntaxes: &'static SyntaxSet,
}

impl SyntectHighlighter {
    /// Uses syntect's bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntaxes: &DEFAULT_SYNTAXES,
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> Result<Option<String>, DocsError> {
        if lang.is_empty() {
            return Ok(None);
        }
        let syntax = self
            .syntaxes
            .find_syntax_by_token(lang)
            .or_else(|| {
                alias_of(lang).and_then(|target| self.syntaxes.find_syntax_by_token(target))
            });
        let Some(syntax) = syntax else {
            return Ok(None);
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            self.syntaxes,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| DocsError::highlight_error(lang, err.to_string()))?;
        }
        Ok(Some(generator.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_is_not_highlighted() {
        let highlighter = SyntectHighlighter::new();
        assert_eq!(highlighter.highlight("x", "no-such-lang").unwrap(), None);
        assert_eq!(highlighter.highlight("x", "").unwrap(), None);
    }

    #[test]
    fn known_language_emits_prefixed_spans() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("const a = 1 < 2\n", "js")
            .unwrap()
            .expect("javascript is bundled");
        assert!(html.contains("class=\"hljs-"));
        assert!(html.contains("&lt;"));
        assert!(!html.contains("1 < 2"));
    }

    #[test]
    fn doc_languages_resolve_through_aliases() {
        let highlighter = SyntectHighlighter::new();
        for lang in ["shell", "ts", "typescript", "vue", "scss", "less", "Shell"] {
            let html = highlighter.highlight("a\n", lang).unwrap();
            assert!(html.is_some(), "{lang} should be highlighted");
        }
    }

    #[test]
    fn closures_are_highlighters() {
        let shout = |code: &str, _lang: &str| -> Result<Option<String>, DocsError> {
            Ok(Some(code.to_uppercase()))
        };
        assert_eq!(shout.highlight("ab", "x").unwrap().as_deref(), Some("AB"));
        assert_eq!(NoHighlight.highlight("ab", "rust").unwrap(), None);
    }
}
