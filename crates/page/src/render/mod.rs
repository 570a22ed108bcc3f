//! MDAST-based Markdown to HTML renderer.
//!
//! markdown-rs owns the grammar; this module walks the resulting tree and
//! emits HTML, handing fenced code to a [`Highlighter`] plugin.
//!
//! - `context` - output buffer, scope stack, definitions and footnotes
//! - `nodes` - AST node rendering functions

mod context;
mod nodes;

pub use context::{Context, Scope};

use crate::highlight::Highlighter;
use mdsite_core::{DocsError, ParseOptions, parse_mdast};
use nodes::render_node;

/// Renders markdown to HTML, highlighting fenced code with `highlighter`.
///
/// `style` is an optional stylesheet URL linked inside every highlighted block.
///
/// # Examples
///
/// ```
/// use mdsite_page::highlight::NoHighlight;
/// use mdsite_page::render::render_markdown;
///
/// let html = render_markdown("Hello, *world*!", &NoHighlight, None).unwrap();
/// assert_eq!(html, "<p>Hello, <em>world</em>!</p>\n");
/// ```
pub fn render_markdown(
    input: &str,
    highlighter: &dyn Highlighter,
    style: Option<&str>,
) -> Result<String, DocsError> {
    let tree = parse_mdast(input, &ParseOptions::docs())?;

    let mut ctx = Context::new(highlighter, style);
    ctx.collect_definitions(&tree);
    render_node(&tree, &mut ctx)?;
    Ok(ctx.finish())
}
