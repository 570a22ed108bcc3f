//! Build-tool plugin hooks.
//!
//! The host calls these the way a bundler calls plugin hooks: `transform`
//! for every module, `handle_hot_update` when a watched file changes,
//! `configure_server` when the dev server starts, and `resolve_id`/`load`
//! for the search index virtual modules.

use crate::builder::{IndexBuilder, ScanReport};
use crate::config::{BuildMode, SiteConfig};
use crate::modules::{locale_module, request_path};
use crate::source::DocumentSource;
use crate::store::SearchIndex;
use mdsite_core::DocsError;
use mdsite_page::PageRenderer;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

/// Plugin name reported to the host.
pub const PLUGIN_NAME: &str = "mdsite-markdown";

fn is_markdown(id: &str) -> bool {
    id.ends_with(".md")
}

/// Markdown page transform and search index server.
pub struct DocsPlugin {
    builder: IndexBuilder,
    source: Box<dyn DocumentSource + Send + Sync>,
    index: Arc<SearchIndex>,
    mode: BuildMode,
    production_scan: OnceCell<ScanReport>,
}

impl DocsPlugin {
    /// Creates a plugin from a site config and a document source.
    pub fn new(config: SiteConfig, source: impl DocumentSource + Send + Sync + 'static) -> Self {
        let mode = config.search.mode;
        let builder = IndexBuilder::new(PageRenderer::new(config.page), config.search);
        Self::with_builder(builder, source, mode)
    }

    /// Creates a plugin from a prepared builder.
    pub fn with_builder(
        builder: IndexBuilder,
        source: impl DocumentSource + Send + Sync + 'static,
        mode: BuildMode,
    ) -> Self {
        Self {
            builder,
            source: Box::new(source),
            index: Arc::new(SearchIndex::new()),
            mode,
            production_scan: OnceCell::new(),
        }
    }

    /// Shares an existing index store instead of a private one.
    pub fn with_index(mut self, index: Arc<SearchIndex>) -> Self {
        self.index = index;
        self
    }

    /// Plugin name reported to the host.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// The index store the plugin publishes into.
    pub fn index(&self) -> Arc<SearchIndex> {
        Arc::clone(&self.index)
    }

    /// Renders markdown modules into page components; other ids are ignored.
    pub fn transform(&self, source: &str, id: &str) -> Result<Option<String>, DocsError> {
        if !is_markdown(id) {
            return Ok(None);
        }
        self.builder
            .renderer()
            .render(source)
            .map(Some)
            .map_err(|err| err.in_file(id))
    }

    /// Re-renders a changed markdown file before the host consumes it.
    pub fn handle_hot_update<F>(&self, file: &Path, read: F) -> Result<Option<String>, DocsError>
    where
        F: FnOnce() -> Result<String, DocsError>,
    {
        let id = file.to_string_lossy();
        if !is_markdown(&id) {
            return Ok(None);
        }
        log::debug!("hot update: {}", id);
        self.transform(&read()?, &id)
    }

    /// Builds the index when the dev server starts.
    pub fn configure_server(&self) -> Result<ScanReport, DocsError> {
        self.rebuild()
    }

    /// Rebuilds the index from the document source.
    pub fn rebuild(&self) -> Result<ScanReport, DocsError> {
        self.index.rebuild(&self.builder, self.source.as_ref())
    }

    /// Maps index module ids to their request paths.
    pub fn resolve_id(&self, id: &str) -> Option<String> {
        id.starts_with(&self.builder.options().manifest_id)
            .then(|| request_path(id))
    }

    /// Serves the manifest and per-locale index modules.
    ///
    /// In production mode the first manifest request builds the index.
    pub fn load(&self, id: &str) -> Result<Option<String>, DocsError> {
        let manifest_path = request_path(&self.builder.options().manifest_id);
        if id == manifest_path {
            if self.mode == BuildMode::Production {
                self.production_scan.get_or_try_init(|| self.rebuild())?;
            }
            return Ok(Some(self.index.snapshot().modules().manifest_module()));
        }

        if !id.starts_with(&manifest_path) {
            return Ok(None);
        }
        let snapshot = self.index.snapshot();
        let sections = snapshot
            .modules()
            .lookup(id)
            .and_then(|module| snapshot.sections(&module.locale));
        locale_module(sections).map(Some)
    }
}
