#![deny(missing_docs)]
//! mdsite page engine: markdown docs to single-file page components.
//!
//! The pipeline extracts live-preview blocks, renders markdown through the
//! highlighter plugin, groups headings into cards, annotates code samples for
//! the playground and assembles the page template and script.

/// Playground annotations for highlighted samples.
pub mod annotate;
/// Page component code generation.
pub mod codegen;
/// Live-preview block extraction.
pub mod extract;
/// Syntax highlighter plugin.
pub mod highlight;
/// Page rendering options.
pub mod options;
/// Page rendering pipeline.
pub mod page;
/// Markdown to HTML rendering.
pub mod render;
/// Heading cards and verbatim code.
pub mod wrap;

pub use extract::{ExtractedComponents, ImportLine, extract_components};
pub use highlight::{Highlighter, NoHighlight, SyntectHighlighter};
pub use options::PageOptions;
pub use page::{PageRenderer, render_page, render_page_with};
