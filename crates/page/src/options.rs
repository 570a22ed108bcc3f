//! Page rendering options.

use serde::{Deserialize, Serialize};

/// Options controlling how markdown docs become page components.
///
/// Every field has a default, so partial YAML/JSON configs deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageOptions {
    /// External highlight stylesheet linked inside every highlighted block.
    pub style: Option<String>,
    /// Fence languages treated as live-preview blocks.
    pub preview_languages: Vec<String>,
    /// Class of the container that replaces a live-preview block.
    pub preview_class: String,
    /// Class of the root element of the page template.
    pub doc_class: String,
    /// Class of the card container grouping a heading with its body.
    pub card_class: String,
    /// Tag used for the same-page anchor link inside promoted headings.
    pub anchor_link_tag: String,
    /// Tag wrapping every highlighted code sample.
    pub code_example_tag: String,
    /// Attribute set on the code example tag when the sample is ignored.
    pub ignore_attribute: String,
}

impl PageOptions {
    /// Returns true if `lang` names a live-preview fence.
    pub fn is_preview_language(&self, lang: &str) -> bool {
        self.preview_languages.iter().any(|l| l == lang)
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            style: None,
            preview_languages: vec!["vue".to_string()],
            preview_class: "varlet-component-preview".to_string(),
            doc_class: "varlet-site-doc".to_string(),
            card_class: "card".to_string(),
            anchor_link_tag: "router-link".to_string(),
            code_example_tag: "var-site-code-example".to_string(),
            ignore_attribute: "playground-ignore".to_string(),
        }
    }
}
