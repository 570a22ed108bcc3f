//! Structural post-processing of rendered page HTML.
//!
//! Level-3 headings become anchored, linkable headings. Every `h2`/`h3`
//! starts a new fragment, and fragments holding an `h3` are wrapped in a card
//! container. Finally every `code` element is marked `v-pre` so the template
//! compiler leaves its contents alone.

use crate::options::PageOptions;
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, element, rewrite_str};
use mdsite_core::{DocsError, Token, tokenize};
use std::borrow::Cow;

/// Runs the full structural transform over a rendered HTML body.
pub fn wrap_structure(html: &str, options: &PageOptions) -> Result<String, DocsError> {
    let grouped = group_into_cards(html, options);
    mark_code_verbatim(&grouped)
}

#[derive(Default)]
struct Fragment {
    html: String,
    has_h3: bool,
}

/// Splits `html` at heading boundaries and wraps `h3` fragments in cards.
pub fn group_into_cards(html: &str, options: &PageOptions) -> String {
    let tokens = tokenize(html);
    let mut fragments = vec![Fragment::default()];
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let level = match token {
            Token::Start(tag) => tag.heading_level(),
            _ => None,
        };

        match (level, token) {
            (Some(2), _) => fragments.push(Fragment::default()),
            (Some(3), Token::Start(tag)) if tag.has_no_attributes() => {
                if let Some(close) = find_close(&tokens, i + 1, "h3") {
                    fragments.push(Fragment {
                        html: anchored_heading(&tokens[i + 1..close], tokens[close], options),
                        has_h3: true,
                    });
                    i = close + 1;
                    continue;
                }
                fragments.push(Fragment::default());
            }
            _ => {}
        }

        if let Some(current) = fragments.last_mut() {
            current.has_h3 |= level == Some(3);
            current.html.push_str(token.raw());
        }
        i += 1;
    }

    let mut out = String::with_capacity(html.len() + 64);
    for fragment in fragments {
        if fragment.has_h3 {
            out.push_str(&format!(
                "<div class=\"{}\">{}</div>",
                options.card_class, fragment.html
            ));
        } else {
            out.push_str(&fragment.html);
        }
    }
    out
}

fn find_close(tokens: &[Token<'_>], from: usize, name: &str) -> Option<usize> {
    tokens[from..]
        .iter()
        .position(|token| token.is_end_of(name))
        .map(|offset| from + offset)
}

/// Builds `<h3 id="t"><router-link to="#t">#</router-link>inner</h3>`.
fn anchored_heading(inner: &[Token<'_>], close: Token<'_>, options: &PageOptions) -> String {
    let text: String = inner
        .iter()
        .filter_map(|token| match token {
            Token::Text(text) => Some(*text),
            _ => None,
        })
        .collect();
    let id = text.trim().replace('"', "&quot;");
    let body: String = inner.iter().map(Token::raw).collect();

    format!(
        "<h3 id=\"{id}\"><{link} to=\"#{id}\">#</{link}>{body}{close}",
        link = options.anchor_link_tag,
        close = close.raw(),
    )
}

fn verbatim_code_handler() -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!("code", |el| {
        el.set_attribute("v-pre", "")?;
        Ok(())
    })
}

/// Adds the `v-pre` attribute to every `code` element.
pub fn mark_code_verbatim(html: &str) -> Result<String, DocsError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![verbatim_code_handler()],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| DocsError::Rewrite(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(html: &str) -> String {
        group_into_cards(html, &PageOptions::default())
    }

    #[test]
    fn h3_becomes_anchored_card() {
        let html = "<h1>Button</h1>\n<h3>Basic Usage</h3>\n<p>Body</p>\n";
        assert_eq!(
            group(html),
            "<h1>Button</h1>\n<div class=\"card\"><h3 id=\"Basic Usage\"><router-link to=\"#Basic Usage\">#</router-link>Basic Usage</h3>\n<p>Body</p>\n</div>"
        );
    }

    #[test]
    fn anchors_follow_heading_order() {
        let html = "<h3>One</h3><p>a</p><h3>Two</h3><p>b</p><h3>Three</h3>";
        let out = group(html);
        let ids: Vec<&str> = out
            .match_indices("id=\"")
            .map(|(pos, _)| {
                let rest = &out[pos + 4..];
                &rest[..rest.find('"').unwrap()]
            })
            .collect();
        assert_eq!(ids, vec!["One", "Two", "Three"]);
        assert_eq!(out.matches("<div class=\"card\">").count(), 3);
    }

    #[test]
    fn h2_splits_cards_without_becoming_one() {
        let html = "<h3>A</h3><p>x</p><h2>API</h2><p>y</p>";
        assert_eq!(
            group(html),
            "<div class=\"card\"><h3 id=\"A\"><router-link to=\"#A\">#</router-link>A</h3><p>x</p></div><h2>API</h2><p>y</p>"
        );
    }

    #[test]
    fn h2_with_following_h3_shares_a_card() {
        let html = "<h2>API</h2><h3>Props</h3><p>t</p>";
        let out = group(html);
        assert_eq!(
            out,
            "<h2>API</h2><div class=\"card\"><h3 id=\"Props\"><router-link to=\"#Props\">#</router-link>Props</h3><p>t</p></div>"
        );
    }

    #[test]
    fn heading_markup_is_kept_and_id_uses_text() {
        let html = "<h3>Use <code>size</code> &amp; more</h3>";
        assert_eq!(
            group(html),
            "<div class=\"card\"><h3 id=\"Use size &amp; more\"><router-link to=\"#Use size &amp; more\">#</router-link>Use <code>size</code> &amp; more</h3></div>"
        );
    }

    #[test]
    fn h3_with_attributes_is_left_alone_but_carded() {
        let html = "<p>a</p><h3 id=\"custom\">Custom</h3><p>b</p>";
        assert_eq!(
            group(html),
            "<div class=\"card\"><p>a</p><h3 id=\"custom\">Custom</h3><p>b</p></div>"
        );
    }

    #[test]
    fn custom_link_tag_and_card_class() {
        let options = PageOptions {
            anchor_link_tag: "a-link".into(),
            card_class: "panel".into(),
            ..PageOptions::default()
        };
        let out = group_into_cards("<h3>X</h3>", &options);
        assert_eq!(
            out,
            "<div class=\"panel\"><h3 id=\"X\"><a-link to=\"#X\">#</a-link>X</h3></div>"
        );
    }

    #[test]
    fn code_elements_get_v_pre() {
        let out = mark_code_verbatim("<p><code>{{ a }}</code></p><pre><code class=\"language-x\">b</code></pre>").unwrap();
        assert_eq!(
            out,
            "<p><code v-pre=\"\">{{ a }}</code></p><pre><code class=\"language-x\" v-pre=\"\">b</code></pre>"
        );
    }

    #[test]
    fn full_wrap_keeps_component_placeholders() {
        let html = "<h3>Demo</h3>\n<div class=\"varlet-component-preview\"><basic-usage />\n</div>\n";
        let out = wrap_structure(html, &PageOptions::default()).unwrap();
        assert!(out.contains("<basic-usage />"));
        assert!(out.starts_with("<div class=\"card\"><h3 id=\"Demo\">"));
    }
}
