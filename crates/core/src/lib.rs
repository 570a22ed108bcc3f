#![deny(missing_docs)]
//! mdsite core: error types, markdown parsing, fence tracking, and markup helpers.

/// Code fence detection utilities.
pub mod code_fence;
/// Core error and diagnostic types.
pub mod error;
/// Lossless markup tokenizer.
pub mod markup;
/// Markdown parsing utilities.
pub mod parse;
/// Entity decoding, whitespace normalization and case conversion.
pub mod text;

pub use code_fence::{
    FenceEvent, FencePhase, FenceState, LineParseOutcome, advance_fence_state, fence_language,
};
pub use error::{DocsError, ParseDiagnostics, ParseWarning, SourceLocation};
pub use markup::{Tag, Token, inner_text, tokenize};
pub use parse::{ParseOptions, parse_mdast};
pub use text::{collapse_whitespace, flatten_markup, kebab_case, unescape};
