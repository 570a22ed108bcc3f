//! Published search index.
//!
//! A scan builds a complete [`IndexSnapshot`] off to the side; publishing
//! swaps it in under a short write lock. Readers hold an `Arc` to whichever
//! snapshot was current when they asked, so they never see a scan half done.

use crate::builder::{IndexBuilder, ScanReport};
use crate::modules::ModuleRegistry;
use crate::section::Section;
use crate::source::DocumentSource;
use mdsite_core::DocsError;
use std::sync::{Arc, RwLock};

/// Sections of one locale, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIndex {
    /// Locale identifier.
    pub locale: String,
    /// Sections in document order, then in-document order.
    pub sections: Vec<Section>,
}

/// Immutable result of one scan.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    locales: Vec<LocaleIndex>,
    modules: ModuleRegistry,
}

impl IndexSnapshot {
    /// Creates a snapshot and its module registry.
    pub fn new(locales: Vec<LocaleIndex>, manifest_id: &str) -> Self {
        let modules = ModuleRegistry::new(
            manifest_id,
            locales.iter().map(|index| index.locale.as_str()),
        );
        Self { locales, modules }
    }

    /// Locales in first-seen order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|index| index.locale.as_str())
    }

    /// Sections of `locale`, if any document had that locale.
    pub fn sections(&self, locale: &str) -> Option<&[Section]> {
        self.locales
            .iter()
            .find(|index| index.locale == locale)
            .map(|index| index.sections.as_slice())
    }

    /// Virtual modules built for this snapshot.
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Total number of sections across locales.
    pub fn section_count(&self) -> usize {
        self.locales.iter().map(|index| index.sections.len()).sum()
    }

    /// Whether the snapshot holds no locales.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Shared holder of the current snapshot.
#[derive(Debug, Default)]
pub struct SearchIndex {
    current: RwLock<Arc<IndexSnapshot>>,
}

impl SearchIndex {
    /// Creates an index holding an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, snapshot: IndexSnapshot) {
        let snapshot = Arc::new(snapshot);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = snapshot;
    }

    /// Runs a full scan and publishes the result.
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub fn rebuild(
        &self,
        builder: &IndexBuilder,
        source: &dyn DocumentSource,
    ) -> Result<ScanReport, DocsError> {
        let (snapshot, report) = builder.build(source)?;
        self.publish(snapshot);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(anchor: &str) -> Section {
        Section {
            level: "3".into(),
            anchor: anchor.into(),
            title: anchor.into(),
            content: "c".into(),
            tokens: format!("{anchor} c"),
            component_id: "button".into(),
        }
    }

    #[test]
    fn snapshot_lookup() {
        let snapshot = IndexSnapshot::new(
            vec![
                LocaleIndex {
                    locale: "zh-CN".into(),
                    sections: vec![section("a")],
                },
                LocaleIndex {
                    locale: "en-US".into(),
                    sections: vec![section("b"), section("c")],
                },
            ],
            "@localSearchIndex",
        );
        assert_eq!(snapshot.locales().collect::<Vec<_>>(), vec!["zh-CN", "en-US"]);
        assert_eq!(snapshot.sections("en-US").map(<[Section]>::len), Some(2));
        assert!(snapshot.sections("ja").is_none());
        assert_eq!(snapshot.section_count(), 3);
        assert_eq!(snapshot.modules().modules().len(), 2);
    }

    #[test]
    fn readers_keep_their_snapshot_across_publish() {
        let index = SearchIndex::new();
        let before = index.snapshot();
        assert!(before.is_empty());

        index.publish(IndexSnapshot::new(
            vec![LocaleIndex {
                locale: "en-US".into(),
                sections: vec![section("a")],
            }],
            "@localSearchIndex",
        ));

        assert!(before.is_empty());
        assert_eq!(index.snapshot().section_count(), 1);
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let index = Arc::new(SearchIndex::new());
        let writer = {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                for n in 1..=50 {
                    let sections = (0..n).map(|i| section(&i.to_string())).collect();
                    index.publish(IndexSnapshot::new(
                        vec![LocaleIndex {
                            locale: "en-US".into(),
                            sections,
                        }],
                        "@localSearchIndex",
                    ));
                }
            })
        };
        for _ in 0..200 {
            let snapshot = index.snapshot();
            if let Some(sections) = snapshot.sections("en-US") {
                let anchors: Vec<String> = (0..sections.len()).map(|i| i.to_string()).collect();
                let seen: Vec<String> = sections.iter().map(|s| s.anchor.clone()).collect();
                assert_eq!(seen, anchors);
            }
        }
        writer.join().unwrap();
        assert_eq!(index.snapshot().section_count(), 50);
    }
}
