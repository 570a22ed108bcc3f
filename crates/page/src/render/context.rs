//! Rendering context for the mdast renderer.

use crate::highlight::Highlighter;
use markdown::mdast::Node;
use mdsite_core::DocsError;
use std::collections::HashMap;

/// Represents the type of scope currently being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    /// Document root - not inside any specific block element.
    Root,
    /// Inside a paragraph element (`<p>`).
    Paragraph,
    /// Inside a list element (`<ul>` or `<ol>`).
    List {
        /// Whether items are separated by blank lines.
        spread: bool,
    },
    /// Inside a table element (`<table>`).
    Table,
}

/// Link definition target collected before rendering.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Tracks output and scope while walking the markdown AST.
pub struct Context<'a> {
    /// Rendered HTML so far.
    html: String,
    stack: Vec<Scope>,
    highlighter: &'a dyn Highlighter,
    style: Option<&'a str>,
    definitions: HashMap<String, Definition>,
    /// Footnote identifiers in first-reference order.
    footnote_order: Vec<String>,
    /// Rendered footnote bodies keyed by identifier.
    footnotes: HashMap<String, String>,
}

impl<'a> Context<'a> {
    /// Creates a context rendering code through `highlighter`.
    pub fn new(highlighter: &'a dyn Highlighter, style: Option<&'a str>) -> Self {
        Self {
            html: String::with_capacity(4096),
            stack: vec![Scope::Root],
            highlighter,
            style,
            definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnotes: HashMap::new(),
        }
    }

    /// Writes a raw string without escaping (for safe HTML tags).
    pub fn push_raw(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Writes text content with HTML escaping.
    pub fn push_text(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '<' => self.html.push_str("&lt;"),
                '>' => self.html.push_str("&gt;"),
                '&' => self.html.push_str("&amp;"),
                '"' => self.html.push_str("&quot;"),
                _ => self.html.push(c),
            }
        }
    }

    /// Writes an HTML-escaped attribute value.
    pub fn push_attr_value(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '<' => self.html.push_str("&lt;"),
                '>' => self.html.push_str("&gt;"),
                '&' => self.html.push_str("&amp;"),
                '"' => self.html.push_str("&quot;"),
                '\'' => self.html.push_str("&#39;"),
                _ => self.html.push(c),
            }
        }
    }

    /// Returns true if inside a tight (non-spread) list.
    ///
    /// Tight list items render their paragraphs without `<p>` wrappers.
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// Returns true if currently in a paragraph scope.
    pub fn is_in_paragraph(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::Paragraph))
    }

    /// Returns true if inside a table.
    pub fn is_in_table(&self) -> bool {
        self.stack.iter().any(|scope| matches!(scope, Scope::Table))
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Runs the highlighter plugin on a code sample.
    pub fn highlight(&self, code: &str, lang: &str) -> Result<Option<String>, DocsError> {
        self.highlighter.highlight(code, lang)
    }

    /// Stylesheet linked inside highlighted blocks.
    pub fn style(&self) -> Option<&'a str> {
        self.style
    }

    /// Collects every link definition in the tree so references can resolve.
    pub fn collect_definitions(&mut self, node: &Node) {
        if let Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| Definition {
                    url: def.url.clone(),
                    title: def.title.clone(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Looks up a link definition by normalized identifier.
    pub fn definition(&self, identifier: &str) -> Option<Definition> {
        self.definitions.get(identifier).cloned()
    }

    /// Returns the 1-based ordinal of a footnote, assigning one on first use.
    pub fn footnote_ordinal(&mut self, identifier: &str) -> usize {
        if let Some(pos) = self.footnote_order.iter().position(|id| id == identifier) {
            return pos + 1;
        }
        self.footnote_order.push(identifier.to_string());
        self.footnote_order.len()
    }

    /// Takes the HTML rendered since `start`, leaving the buffer truncated.
    pub fn split_off(&mut self, start: usize) -> String {
        self.html.split_off(start)
    }

    /// Current end of the output buffer, for use with [`Context::split_off`].
    pub fn mark(&self) -> usize {
        self.html.len()
    }

    /// Stores a rendered footnote body.
    pub fn push_footnote(&mut self, identifier: String, body: String) {
        self.footnotes.insert(identifier, body);
    }

    /// Consumes the context and returns the rendered HTML.
    pub fn finish(mut self) -> String {
        let referenced: Vec<(usize, String)> = self
            .footnote_order
            .iter()
            .enumerate()
            .filter_map(|(idx, id)| self.footnotes.get(id).map(|body| (idx + 1, body.clone())))
            .collect();

        if !referenced.is_empty() {
            self.html
                .push_str("<section class=\"footnotes\">\n<ol class=\"footnotes-list\">\n");
            for (ordinal, body) in referenced {
                self.html.push_str(&format!(
                    "<li id=\"fn{ordinal}\" class=\"footnote-item\">{body}</li>\n"
                ));
            }
            self.html.push_str("</ol>\n</section>\n");
        }
        self.html
    }
}
