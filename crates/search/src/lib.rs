#![deny(missing_docs)]
//! mdsite search: per-locale section index built from rendered doc pages.
//!
//! Documents are rendered with the page pipeline, split into anchored
//! sections, segmented into search tokens and grouped by the locale in their
//! path. The index is published as an immutable snapshot and served to the
//! site as virtual modules.

/// Full index scans.
pub mod builder;
/// Site configuration.
pub mod config;
/// Virtual index modules.
pub mod modules;
/// Component and locale path convention.
pub mod path;
/// Build-tool plugin hooks.
pub mod plugin;
/// Section extraction.
pub mod section;
/// Document discovery.
pub mod source;
/// Published index snapshots.
pub mod store;
/// Word segmentation.
pub mod tokenize;

pub use builder::{IndexBuilder, ScanFailure, ScanReport};
pub use config::{
    BuildMode, FailurePolicy, LOCAL_SEARCH_INDEX_ID, SearchOptions, SiteConfig,
    UnmatchedPathPolicy,
};
pub use modules::{LocaleModule, ModuleRegistry};
pub use path::{CmpAndLocale, cmp_and_locale};
pub use plugin::DocsPlugin;
pub use section::{Section, parse_sections};
pub use source::{DocumentSource, GlobSource, MemorySource};
pub use store::{IndexSnapshot, LocaleIndex, SearchIndex};
pub use tokenize::{JiebaSegmenter, Segmenter, WhitespaceSegmenter};
