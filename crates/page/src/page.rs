//! Markdown document to page component pipeline.

use crate::annotate::annotate_code_examples;
use crate::codegen::assemble_page;
use crate::extract::extract_components;
use crate::highlight::{Highlighter, SyntectHighlighter};
use crate::options::PageOptions;
use crate::render::render_markdown;
use crate::wrap::wrap_structure;
use mdsite_core::DocsError;

/// Text that would otherwise be replaced by the bundler at build time.
const ENV_ACCESS: &str = "process.env";

/// Renders a markdown document into a page component using the bundled
/// syntect highlighter.
///
/// Any markdown or highlighter failure is returned as an error; no partial
/// page is produced.
pub fn render_page(source: &str, options: &PageOptions) -> Result<String, DocsError> {
    render_page_with(source, options, &SyntectHighlighter::new())
}

/// Renders a markdown document into a page component with a custom
/// highlighter plugin.
pub fn render_page_with(
    source: &str,
    options: &PageOptions,
    highlighter: &dyn Highlighter,
) -> Result<String, DocsError> {
    let extracted = extract_components(source, options);
    for warning in &extracted.diagnostics.warnings {
        log::warn!("live preview block left as code: {}", warning);
    }

    let html = render_markdown(&extracted.source, highlighter, options.style.as_deref())?;
    let body = wrap_structure(&html, options)?;
    let body = body.replace(ENV_ACCESS, "<span>process.env</span>");
    let body = annotate_code_examples(&body, options);

    log::debug!(
        "rendered page: {} bytes, {} imports, {} components",
        body.len(),
        extracted.imports.len(),
        extracted.components.len()
    );

    Ok(assemble_page(
        &body,
        &options.doc_class,
        &extracted.imports,
        &extracted.components,
    ))
}

/// Page pipeline bound to its options and highlighter plugin.
pub struct PageRenderer {
    options: PageOptions,
    highlighter: Box<dyn Highlighter + Send + Sync>,
}

impl PageRenderer {
    /// Creates a renderer using the bundled syntect highlighter.
    pub fn new(options: PageOptions) -> Self {
        Self::with_highlighter(options, SyntectHighlighter::new())
    }

    /// Creates a renderer with a custom highlighter plugin.
    pub fn with_highlighter(
        options: PageOptions,
        highlighter: impl Highlighter + Send + Sync + 'static,
    ) -> Self {
        Self {
            options,
            highlighter: Box::new(highlighter),
        }
    }

    /// Options this renderer was built with.
    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Renders one markdown document into a page component.
    pub fn render(&self, source: &str) -> Result<String, DocsError> {
        render_page_with(source, &self.options, self.highlighter.as_ref())
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}
