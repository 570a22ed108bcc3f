//! Minimal HTML tokenizer for post-processing rendered markup.
//!
//! Produces a flat, lossless token stream: concatenating every token's raw
//! text reproduces the input exactly. Structural transforms walk this stream
//! instead of matching regular expressions over the markup.

/// A single markup token borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening tag such as `<h3 id="x">`.
    Start(Tag<'a>),
    /// Closing tag such as `</h3>`.
    End(Tag<'a>),
    /// Character data between tags (entities left encoded).
    Text(&'a str),
    /// Comments, doctypes and processing instructions.
    Other(&'a str),
}

impl<'a> Token<'a> {
    /// Raw source text of the token.
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Start(tag) | Token::End(tag) => tag.raw,
            Token::Text(text) | Token::Other(text) => text,
        }
    }

    /// Returns the tag if this is an opening tag named `name`.
    pub fn start_named(&self, name: &str) -> Option<&Tag<'a>> {
        match self {
            Token::Start(tag) if tag.is(name) => Some(tag),
            _ => None,
        }
    }

    /// Whether this is a closing tag named `name`.
    pub fn is_end_of(&self, name: &str) -> bool {
        matches!(self, Token::End(tag) if tag.is(name))
    }
}

/// An opening or closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written in the source.
    pub name: &'a str,
    /// Full raw text including angle brackets.
    pub raw: &'a str,
    /// Whether the tag ends with `/>`.
    pub self_closing: bool,
}

impl<'a> Tag<'a> {
    /// Case-insensitive tag name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Heading depth for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let bytes = self.name.as_bytes();
        if bytes.len() == 2
            && (bytes[0] == b'h' || bytes[0] == b'H')
            && (b'1'..=b'6').contains(&bytes[1])
        {
            Some(bytes[1] - b'0')
        } else {
            None
        }
    }

    /// Whether the tag carries no attributes at all.
    pub fn has_no_attributes(&self) -> bool {
        self.attributes().next().is_none()
    }

    /// Value of the attribute `name` (raw, entities left encoded).
    ///
    /// Valueless attributes yield an empty string.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Whether the `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// Iterates `(name, value)` attribute pairs in source order.
    pub fn attributes(&self) -> Attributes<'a> {
        let inner = self.raw.trim_start_matches('<').trim_start_matches('/');
        let body = inner
            .trim_end_matches('>')
            .trim_end_matches('/')
            .get(self.name.len()..)
            .unwrap_or("");
        Attributes { rest: body }
    }
}

/// Iterator over the attributes of a [`Tag`].
pub struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        let after_name = rest[name_end..].trim_start();

        let Some(after_eq) = after_name.strip_prefix('=') else {
            self.rest = after_name;
            return Some((name, ""));
        };
        let after_eq = after_eq.trim_start();

        let (value, remaining) = match after_eq.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &after_eq[1..];
                match body.find(quote) {
                    Some(end) => (&body[..end], &body[end + 1..]),
                    None => (body, ""),
                }
            }
            _ => {
                let end = after_eq
                    .find(char::is_whitespace)
                    .unwrap_or(after_eq.len());
                (&after_eq[..end], &after_eq[end..])
            }
        };
        self.rest = remaining;
        Some((name, value))
    }
}

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Splits `html` into a lossless token stream.
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < len {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let Some((token, end)) = scan_markup(html, i) else {
            i += 1;
            continue;
        };

        if text_start < i {
            tokens.push(Token::Text(&html[text_start..i]));
        }
        tokens.push(token);
        i = end;
        text_start = end;

        // Raw text elements swallow everything up to their closing tag.
        if let Token::Start(tag) = token
            && !tag.self_closing
            && RAW_TEXT_ELEMENTS.iter().any(|raw| tag.is(raw))
        {
            let close = find_closing_tag(html, i, tag.name).unwrap_or(len);
            if i < close {
                tokens.push(Token::Text(&html[i..close]));
            }
            i = close;
            text_start = close;
        }
    }

    if text_start < len {
        tokens.push(Token::Text(&html[text_start..]));
    }
    tokens
}

/// Scans a tag, comment or declaration starting at `start` (which holds `<`).
fn scan_markup(html: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let rest = &html[start..];
    let bytes = rest.as_bytes();

    if rest.starts_with("<!--") {
        let end = rest[4..].find("-->").map_or(rest.len(), |pos| pos + 4 + 3);
        return Some((Token::Other(&rest[..end]), start + end));
    }
    if bytes.get(1).is_some_and(|b| *b == b'!' || *b == b'?') {
        let end = rest.find('>').map_or(rest.len(), |pos| pos + 1);
        return Some((Token::Other(&rest[..end]), start + end));
    }

    let closing = bytes.get(1) == Some(&b'/');
    let name_start = if closing { 2 } else { 1 };
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let name_len = rest[name_start..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len() - name_start);
    let name = &rest[name_start..name_start + name_len];
    let end = find_tag_end(rest, name_start + name_len)?;
    let raw = &rest[..end];
    let tag = Tag {
        name,
        raw,
        self_closing: raw.ends_with("/>"),
    };
    let token = if closing {
        Token::End(tag)
    } else {
        Token::Start(tag)
    };
    Some((token, start + end))
}

/// Finds the byte just past the `>` that ends a tag, honoring quoted values.
fn find_tag_end(rest: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (offset, b) in rest.as_bytes()[from..].iter().enumerate() {
        match (quote, *b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(*b),
            (None, b'>') => return Some(from + offset + 1),
            (None, _) => {}
        }
    }
    None
}

fn find_closing_tag(html: &str, from: usize, name: &str) -> Option<usize> {
    let needle = format!("</{}", name.to_ascii_lowercase());
    let lower = html[from..].to_ascii_lowercase();
    lower.find(&needle).map(|pos| from + pos)
}

/// Concatenates the text tokens of `html`, dropping every tag.
pub fn inner_text(html: &str) -> String {
    tokenize(html)
        .into_iter()
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(tokens: &[Token<'_>]) -> String {
        tokens.iter().map(Token::raw).collect()
    }

    #[test]
    fn tokenizes_losslessly() {
        let html = "<h3>Title <code>a &lt; b</code></h3>\n<p class=\"x\">Body<br/>text</p><!-- c -->";
        let tokens = tokenize(html);
        assert_eq!(reassemble(&tokens), html);
        assert!(matches!(tokens[0], Token::Start(tag) if tag.is("h3")));
        assert!(tokens.iter().any(|t| matches!(t, Token::Other("<!-- c -->"))));
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        let html = "a < b and 1<2 <>";
        let tokens = tokenize(html);
        assert_eq!(tokens, vec![Token::Text(html)]);
    }

    #[test]
    fn quoted_attribute_may_contain_gt() {
        let html = r##"<a title="x > y" href="#z">link</a>"##;
        let tokens = tokenize(html);
        let Token::Start(tag) = tokens[0] else {
            panic!("expected start tag");
        };
        assert_eq!(tag.attr("title"), Some("x > y"));
        assert_eq!(tag.attr("href"), Some("#z"));
        assert_eq!(tokens[1], Token::Text("link"));
    }

    #[test]
    fn attributes_cover_valueless_and_unquoted() {
        let html = "<code v-pre data-x=1 class='a b'>";
        let tokens = tokenize(html);
        let Token::Start(tag) = tokens[0] else {
            panic!("expected start tag");
        };
        let attrs: Vec<_> = tag.attributes().collect();
        assert_eq!(attrs, vec![("v-pre", ""), ("data-x", "1"), ("class", "a b")]);
        assert!(tag.has_class("b"));
        assert!(!tag.has_no_attributes());
    }

    #[test]
    fn self_closing_component_tags() {
        let tokens = tokenize("<var-button />");
        let Token::Start(tag) = tokens[0] else {
            panic!("expected start tag");
        };
        assert_eq!(tag.name, "var-button");
        assert!(tag.self_closing);
        assert!(tag.has_no_attributes());
    }

    #[test]
    fn script_content_is_raw_text() {
        let html = "<script>if (a<b) { x = '<h3>' }</script><h3>T</h3>";
        let tokens = tokenize(html);
        assert_eq!(tokens[1], Token::Text("if (a<b) { x = '<h3>' }"));
        assert!(tokens[2].is_end_of("script"));
        assert!(tokens[3].start_named("h3").is_some());
    }

    #[test]
    fn heading_levels() {
        let tokens = tokenize("<H2><h7><header>");
        let levels: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Start(tag) => Some(tag.heading_level()),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![Some(2), None, None]);
    }

    #[test]
    fn inner_text_drops_tags() {
        assert_eq!(inner_text("Hello <b>World</b>!"), "Hello World!");
    }
}
