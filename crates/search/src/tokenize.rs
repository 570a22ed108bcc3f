//! Word segmentation for search tokens.

use jieba_rs::Jieba;
use once_cell::sync::Lazy;

/// Splits text into search tokens.
pub trait Segmenter {
    /// Segments `text`; whitespace-only tokens must not be returned.
    fn segment(&self, text: &str) -> Vec<String>;
}

static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Dictionary-based segmenter for mixed CJK and Latin text (HMM enabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct JiebaSegmenter;

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        JIEBA
            .cut(text, true)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Splits on whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Token string for a section: `title + " " + content`, segmented and
/// joined with single spaces.
pub fn section_tokens(segmenter: &dyn Segmenter, title: &str, content: &str) -> String {
    segmenter.segment(&format!("{title} {content}")).join(" ")
}
