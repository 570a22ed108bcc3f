//! Rendering functions for the mdast renderer.

use super::context::{Context, Scope};
use markdown::mdast::{self, Node};
use mdsite_core::DocsError;

type RenderResult = Result<(), DocsError>;

fn render_children(children: &[Node], ctx: &mut Context) -> RenderResult {
    for child in children {
        render_node(child, ctx)?;
    }
    Ok(())
}

/// Renders a list node as `<ul>` or `<ol>`.
fn render_list(list: &mdast::List, ctx: &mut Context) -> RenderResult {
    if list.ordered {
        match list.start {
            Some(start) if start != 1 => ctx.push_raw(&format!("<ol start=\"{}\">\n", start)),
            _ => ctx.push_raw("<ol>\n"),
        }
    } else {
        ctx.push_raw("<ul>\n");
    }
    ctx.enter(Scope::List {
        spread: list.spread,
    });
    render_children(&list.children, ctx)?;
    ctx.exit();
    ctx.push_raw(if list.ordered { "</ol>\n" } else { "</ul>\n" });
    Ok(())
}

/// Renders a list item, with a disabled checkbox for GFM task items.
fn render_list_item(item: &mdast::ListItem, ctx: &mut Context) -> RenderResult {
    match item.checked {
        Some(true) => ctx.push_raw("<li class=\"task-list-item\"><input type=\"checkbox\" disabled checked> "),
        Some(false) => {
            ctx.push_raw("<li class=\"task-list-item\"><input type=\"checkbox\" disabled> ")
        }
        None => ctx.push_raw("<li>"),
    }
    render_children(&item.children, ctx)?;
    ctx.push_raw("</li>\n");
    Ok(())
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &mdast::Paragraph, ctx: &mut Context) -> RenderResult {
    let in_tight_list = ctx.is_in_tight_list();
    if !in_tight_list {
        ctx.push_raw("<p>");
    }
    ctx.enter(Scope::Paragraph);
    render_children(&para.children, ctx)?;
    ctx.exit();
    if !in_tight_list {
        ctx.push_raw("</p>\n");
    }
    Ok(())
}

fn push_anchor_open(url: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw(r#"<a href=""#);
    ctx.push_attr_value(url);
    ctx.push_raw(r#"""#);
    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr_value(title);
        ctx.push_raw(r#"""#);
    }
    ctx.push_raw(">");
}

fn push_image(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw(r#"<img src=""#);
    ctx.push_attr_value(url);
    ctx.push_raw(r#"" alt=""#);
    ctx.push_attr_value(alt);
    ctx.push_raw(r#"""#);
    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr_value(title);
        ctx.push_raw(r#"""#);
    }
    ctx.push_raw(">");
}

/// Renders a reference-style link using the collected definitions.
fn render_link_reference(link: &mdast::LinkReference, ctx: &mut Context) -> RenderResult {
    match ctx.definition(&link.identifier) {
        Some(def) => {
            push_anchor_open(&def.url, def.title.as_deref(), ctx);
            render_children(&link.children, ctx)?;
            ctx.push_raw("</a>");
        }
        None => render_children(&link.children, ctx)?,
    }
    Ok(())
}

/// Renders a heading as a plain `<hN>`; ids and anchors are added later by
/// the structural wrapper.
fn render_heading(heading: &mdast::Heading, ctx: &mut Context) -> RenderResult {
    ctx.push_raw(&format!("<h{}>", heading.depth));
    render_children(&heading.children, ctx)?;
    ctx.push_raw(&format!("</h{}>\n", heading.depth));
    Ok(())
}

/// Renders a fenced or indented code block through the highlighter plugin.
///
/// Highlighted output is wrapped as `<pre class="hljs"><code>…</code></pre>`.
/// Unknown languages fall back to an escaped `<pre><code>` block.
fn render_code(code: &mdast::Code, ctx: &mut Context) -> RenderResult {
    let mut source = code.value.clone();
    source.push('\n');
    let lang = code.lang.as_deref().unwrap_or("");

    match ctx.highlight(&source, lang)? {
        Some(highlighted) => {
            ctx.push_raw(r#"<pre class="hljs"><code>"#);
            if let Some(style) = ctx.style() {
                ctx.push_raw(r#"<link class="hljs-style" rel="stylesheet" href=""#);
                ctx.push_attr_value(style);
                ctx.push_raw(r#""/>"#);
            }
            ctx.push_raw(&highlighted);
        }
        None => {
            if lang.is_empty() {
                ctx.push_raw("<pre><code>");
            } else {
                ctx.push_raw(r#"<pre><code class="language-"#);
                ctx.push_attr_value(lang);
                ctx.push_raw(r#"">"#);
            }
            ctx.push_text(&source);
        }
    }
    ctx.push_raw("</code></pre>\n");
    Ok(())
}

/// Renders a table node as `<table>` with `<thead>` and optional `<tbody>`.
fn render_table(table: &mdast::Table, ctx: &mut Context) -> RenderResult {
    ctx.enter(Scope::Table);
    ctx.push_raw("<table>\n<thead>\n");
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align)?;
    }
    ctx.push_raw("</thead>\n");

    if table.children.len() > 1 {
        ctx.push_raw("<tbody>\n");
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(r) = row {
                render_table_row(r, ctx, false, &table.align)?;
            }
        }
        ctx.push_raw("</tbody>\n");
    }
    ctx.push_raw("</table>\n");
    ctx.exit();
    Ok(())
}

fn render_table_row(
    row: &mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[mdast::AlignKind],
) -> RenderResult {
    ctx.push_raw("<tr>\n");
    for (i, cell) in row.children.iter().enumerate() {
        let Node::TableCell(c) = cell else {
            continue;
        };
        let tag = if is_header { "th" } else { "td" };
        let align_attr = match aligns.get(i) {
            Some(mdast::AlignKind::Left) => r#" style="text-align:left""#,
            Some(mdast::AlignKind::Right) => r#" style="text-align:right""#,
            Some(mdast::AlignKind::Center) => r#" style="text-align:center""#,
            _ => "",
        };
        ctx.push_raw(&format!("<{}{}>", tag, align_attr));
        render_children(&c.children, ctx)?;
        ctx.push_raw(&format!("</{}>\n", tag));
    }
    ctx.push_raw("</tr>\n");
    Ok(())
}

/// Renders raw HTML untouched; block-level HTML gets a trailing newline.
fn render_html(html: &mdast::Html, ctx: &mut Context) {
    ctx.push_raw(&html.value);
    if !ctx.is_in_paragraph() && !ctx.is_in_table() {
        ctx.push_raw("\n");
    }
}

fn render_footnote_reference(fnref: &mdast::FootnoteReference, ctx: &mut Context) {
    let ordinal = ctx.footnote_ordinal(&fnref.identifier);
    ctx.push_raw(&format!(
        "<sup class=\"footnote-ref\"><a href=\"#fn{ordinal}\" id=\"fnref{ordinal}\">[{ordinal}]</a></sup>"
    ));
}

/// Renders a footnote definition into a side buffer emitted by `finish()`.
fn render_footnote_definition(
    fndef: &mdast::FootnoteDefinition,
    ctx: &mut Context,
) -> RenderResult {
    let start = ctx.mark();
    render_children(&fndef.children, ctx)?;
    let body = ctx.split_off(start);
    ctx.push_footnote(fndef.identifier.clone(), body);
    Ok(())
}

/// Recursively renders an AST node to HTML.
pub fn render_node(node: &Node, ctx: &mut Context) -> RenderResult {
    match node {
        Node::Root(root) => render_children(&root.children, ctx)?,
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx)?,
        Node::Link(link) => {
            push_anchor_open(&link.url, link.title.as_deref(), ctx);
            render_children(&link.children, ctx)?;
            ctx.push_raw("</a>");
        }
        Node::LinkReference(link) => render_link_reference(link, ctx)?,
        Node::Strong(strong) => {
            ctx.push_raw("<strong>");
            render_children(&strong.children, ctx)?;
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(emphasis) => {
            ctx.push_raw("<em>");
            render_children(&emphasis.children, ctx)?;
            ctx.push_raw("</em>");
        }
        Node::Delete(delete) => {
            ctx.push_raw("<s>");
            render_children(&delete.children, ctx)?;
            ctx.push_raw("</s>");
        }
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br>\n"),
        Node::Heading(heading) => render_heading(heading, ctx)?,
        Node::List(list) => render_list(list, ctx)?,
        Node::ListItem(item) => render_list_item(item, ctx)?,
        Node::Code(code) => render_code(code, ctx)?,
        Node::Blockquote(quote) => {
            ctx.push_raw("<blockquote>\n");
            render_children(&quote.children, ctx)?;
            ctx.push_raw("</blockquote>\n");
        }
        Node::Image(img) => push_image(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::ImageReference(img) => {
            if let Some(def) = ctx.definition(&img.identifier) {
                push_image(&def.url, &img.alt, def.title.as_deref(), ctx);
            } else {
                ctx.push_text(&img.alt);
            }
        }
        Node::ThematicBreak(_) => ctx.push_raw("<hr>\n"),
        Node::Html(html) => render_html(html, ctx),
        Node::Table(table) => render_table(table, ctx)?,
        Node::FootnoteReference(fnref) => render_footnote_reference(fnref, ctx),
        Node::FootnoteDefinition(fndef) => render_footnote_definition(fndef, ctx)?,
        Node::Definition(_) => {}
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
    Ok(())
}
