//! Full index scans.

use crate::config::{FailurePolicy, SearchOptions, UnmatchedPathPolicy};
use crate::path::{CmpAndLocale, cmp_and_locale};
use crate::section::{Section, parse_sections};
use crate::source::DocumentSource;
use crate::store::{IndexSnapshot, LocaleIndex};
use crate::tokenize::{JiebaSegmenter, Segmenter, section_tokens};
use mdsite_core::DocsError;
use mdsite_page::PageRenderer;
use std::path::{Path, PathBuf};

/// A document that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    /// Document path.
    pub path: PathBuf,
    /// Error message.
    pub message: String,
}

/// Summary of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Documents indexed.
    pub documents: usize,
    /// Sections indexed.
    pub sections: usize,
    /// Documents skipped after a read or render failure.
    pub failures: Vec<ScanFailure>,
    /// Documents outside the path convention (bucketed or skipped).
    pub unmatched: Vec<PathBuf>,
}

/// Runs the page pipeline over every document and groups sections by locale.
pub struct IndexBuilder {
    renderer: PageRenderer,
    segmenter: Box<dyn Segmenter + Send + Sync>,
    options: SearchOptions,
}

impl IndexBuilder {
    /// Creates a builder with the jieba segmenter.
    pub fn new(renderer: PageRenderer, options: SearchOptions) -> Self {
        Self::with_segmenter(renderer, options, JiebaSegmenter)
    }

    /// Creates a builder with a custom segmenter.
    pub fn with_segmenter(
        renderer: PageRenderer,
        options: SearchOptions,
        segmenter: impl Segmenter + Send + Sync + 'static,
    ) -> Self {
        Self {
            renderer,
            segmenter: Box::new(segmenter),
            options,
        }
    }

    /// Page renderer shared with the document transform hooks.
    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Search options in use.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Scans every document from `source` into a fresh snapshot.
    pub fn build(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<(IndexSnapshot, ScanReport), DocsError> {
        let paths = source.discover()?;
        log::debug!("scanning {} documents", paths.len());

        let mut locales: Vec<LocaleIndex> = Vec::new();
        let mut report = ScanReport::default();

        for path in paths {
            let Some(owner) = self.owner_of(&path, &mut report)? else {
                continue;
            };

            let sections = match self.index_document(source, &path, &owner.component) {
                Ok(sections) => sections,
                Err(err) => match self.options.failure_policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::SkipAndReport => {
                        log::warn!("skipping {}: {}", path.display(), err);
                        report.failures.push(ScanFailure {
                            path,
                            message: err.to_string(),
                        });
                        continue;
                    }
                },
            };

            report.documents += 1;
            report.sections += sections.len();
            match locales.iter_mut().find(|index| index.locale == owner.locale) {
                Some(index) => index.sections.extend(sections),
                None => locales.push(LocaleIndex {
                    locale: owner.locale,
                    sections,
                }),
            }
        }

        log::info!(
            "search index built: {} documents, {} sections, {} locales, {} failures",
            report.documents,
            report.sections,
            locales.len(),
            report.failures.len()
        );
        Ok((IndexSnapshot::new(locales, &self.options.manifest_id), report))
    }

    /// Applies the unmatched path policy; `None` means skip the document.
    fn owner_of(
        &self,
        path: &Path,
        report: &mut ScanReport,
    ) -> Result<Option<CmpAndLocale>, DocsError> {
        if let Some(owner) = cmp_and_locale(path, &self.options.docs_root) {
            return Ok(Some(owner));
        }
        match self.options.unmatched_path_policy {
            UnmatchedPathPolicy::Bucket => {
                log::warn!(
                    "{} does not match <root>/<component>/docs/<locale>.md; indexing without component or locale",
                    path.display()
                );
                report.unmatched.push(path.to_path_buf());
                Ok(Some(CmpAndLocale::default()))
            }
            UnmatchedPathPolicy::Skip => {
                log::debug!("skipping {}: not a component doc", path.display());
                report.unmatched.push(path.to_path_buf());
                Ok(None)
            }
            UnmatchedPathPolicy::Reject => Err(DocsError::UnmatchedPath(path.to_path_buf())),
        }
    }

    /// Reads, renders, splits and tokenizes one document.
    pub fn index_document(
        &self,
        source: &dyn DocumentSource,
        path: &Path,
        component: &str,
    ) -> Result<Vec<Section>, DocsError> {
        let markdown = source.read(path)?;
        let page = self
            .renderer
            .render(&markdown)
            .map_err(|err| err.in_file(path.display().to_string()))?;

        Ok(parse_sections(&page)
            .into_iter()
            .map(|text| Section {
                tokens: section_tokens(self.segmenter.as_ref(), &text.title, &text.content),
                level: text.level,
                anchor: text.anchor,
                title: text.title,
                content: text.content,
                component_id: component.to_string(),
            })
            .collect())
    }
}
