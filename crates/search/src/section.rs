//! Section extraction from rendered page components.
//!
//! A section starts at a heading carrying a same-page anchor link (or an
//! `id`) and runs until the next such heading. Plain headings in between are
//! part of the section's content.

use mdsite_core::{Token, flatten_markup, tokenize, unescape};
use serde::{Deserialize, Serialize};

/// Searchable excerpt of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Heading depth as text (`"3"`).
    pub level: String,
    /// Anchor target without the leading `#`.
    pub anchor: String,
    /// Plain-text heading title.
    pub title: String,
    /// Plain-text body with whitespace collapsed.
    pub content: String,
    /// Space-joined segmenter output for `title` and `content`.
    pub tokens: String,
    /// Component the owning document belongs to.
    pub component_id: String,
}

/// Section text recovered from the page, before tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    /// Heading depth as text.
    pub level: String,
    /// Anchor target without the leading `#`.
    pub anchor: String,
    /// Plain-text heading title.
    pub title: String,
    /// Plain-text body.
    pub content: String,
}

/// Returns the markup between the first `<template>` and the last `</template>`.
pub fn template_body(page: &str) -> &str {
    const OPEN: &str = "<template>";
    let Some(start) = page.find(OPEN) else {
        return "";
    };
    let body_start = start + OPEN.len();
    match page.rfind("</template>") {
        Some(end) if end >= body_start => &page[body_start..end],
        _ => "",
    }
}

struct OpenSection {
    level: u8,
    anchor: String,
    title: String,
    content: String,
}

/// Splits a rendered page into sections at anchored headings.
///
/// Sections whose title or content is empty after flattening are dropped.
pub fn parse_sections(page: &str) -> Vec<SectionText> {
    let tokens = tokenize(template_body(page));
    let mut sections = Vec::new();
    let mut current: Option<OpenSection> = None;
    let mut i = 0;

    while i < tokens.len() {
        let heading = match tokens[i] {
            Token::Start(tag) => tag.heading_level().map(|level| (level, tag)),
            _ => None,
        };
        let Some((level, tag)) = heading else {
            if let Some(open) = current.as_mut() {
                open.content.push_str(tokens[i].raw());
            }
            i += 1;
            continue;
        };

        let close = tokens[i + 1..]
            .iter()
            .position(|token| token.is_end_of(tag.name))
            .map_or(tokens.len(), |offset| i + 1 + offset);
        let inner = &tokens[i + 1..close];

        let anchor = heading_anchor(inner).or_else(|| {
            tag.attr("id")
                .filter(|id| !id.is_empty())
                .map(|id| (unescape(id).into_owned(), inner))
        });
        let Some((anchor, title_tokens)) = anchor else {
            if let Some(open) = current.as_mut() {
                let end = close.min(tokens.len() - 1);
                open.content.extend(tokens[i..=end].iter().map(Token::raw));
            }
            i = close + 1;
            continue;
        };

        if let Some(open) = current.take() {
            push_section(&mut sections, open);
        }
        current = Some(OpenSection {
            level,
            anchor,
            title: flatten_tokens(title_tokens),
            content: String::new(),
        });
        i = close + 1;
    }

    if let Some(open) = current.take() {
        push_section(&mut sections, open);
    }
    sections
}

/// Finds the first `to="#…"`/`href="#…"` link in a heading.
///
/// Returns the anchor and the tokens following the link, which make up the
/// title.
fn heading_anchor<'t, 'a>(inner: &'t [Token<'a>]) -> Option<(String, &'t [Token<'a>])> {
    inner.iter().enumerate().find_map(|(pos, token)| {
        let Token::Start(tag) = token else {
            return None;
        };
        let target = tag
            .attr("to")
            .or_else(|| tag.attr("href"))
            .and_then(|value| value.strip_prefix('#'))?;
        let after = inner[pos + 1..]
            .iter()
            .position(|t| t.is_end_of(tag.name))
            .map_or(pos + 1, |offset| pos + 1 + offset + 1);
        Some((unescape(target).into_owned(), &inner[after..]))
    })
}

fn flatten_tokens(tokens: &[Token<'_>]) -> String {
    let raw: String = tokens.iter().map(Token::raw).collect();
    flatten_markup(&raw)
}

fn push_section(sections: &mut Vec<SectionText>, open: OpenSection) {
    let content = flatten_markup(&open.content);
    if open.title.is_empty() || content.is_empty() {
        return;
    }
    sections.push(SectionText {
        level: open.level.to_string(),
        anchor: open.anchor,
        title: open.title,
        content,
    });
}
