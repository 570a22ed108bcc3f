//! Site configuration.

use mdsite_core::DocsError;
use mdsite_page::PageOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default id of the index manifest module.
pub const LOCAL_SEARCH_INDEX_ID: &str = "@localSearchIndex";

/// How a scan reacts to a document that fails to read or render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// The first failure aborts the scan; the published index is kept.
    #[default]
    Abort,
    /// Failed documents are skipped and listed in the scan report.
    SkipAndReport,
}

/// How a scan treats documents outside the `<root>/<component>/docs/<locale>.md` layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedPathPolicy {
    /// Index under an empty component and locale, with a warning.
    #[default]
    Bucket,
    /// Leave the document out of the index.
    Skip,
    /// Fail the scan.
    Reject,
}

/// Whether the host is serving a dev build or a production build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    /// The index is built when the dev server starts.
    #[default]
    Development,
    /// The index is built on the first manifest request.
    Production,
}

/// Search index options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Module id of the index manifest.
    pub manifest_id: String,
    /// Folder segment that precedes component folders in document paths.
    pub docs_root: String,
    /// Reaction to per-document failures.
    pub failure_policy: FailurePolicy,
    /// Reaction to documents outside the path convention.
    pub unmatched_path_policy: UnmatchedPathPolicy,
    /// Build mode of the host.
    pub mode: BuildMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            manifest_id: LOCAL_SEARCH_INDEX_ID.to_string(),
            docs_root: "src".to_string(),
            failure_policy: FailurePolicy::default(),
            unmatched_path_policy: UnmatchedPathPolicy::default(),
            mode: BuildMode::default(),
        }
    }
}

/// Top-level configuration: page rendering plus search indexing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page rendering options.
    pub page: PageOptions,
    /// Search index options.
    pub search: SearchOptions,
}

impl SiteConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(input: &str) -> Result<Self, DocsError> {
        serde_yaml::from_str(input).map_err(|err| DocsError::Config(err.to_string()))
    }

    /// Parses a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, DocsError> {
        serde_json::from_str(input).map_err(|err| DocsError::Config(err.to_string()))
    }

    /// Loads a config file, choosing JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let input = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&input)
        } else {
            Self::from_yaml_str(&input)
        };
        config.map_err(|err| match err {
            DocsError::Config(message) => {
                DocsError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = SiteConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.search.manifest_id, "@localSearchIndex");
        assert_eq!(config.search.docs_root, "src");
    }

    #[test]
    fn yaml_overrides() {
        let yaml = "page:\n  style: /hl.css\n  previewLanguages: [vue, tsx]\nsearch:\n  failurePolicy: skip-and-report\n  unmatchedPathPolicy: reject\n  mode: production\n";
        let config = SiteConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.page.style.as_deref(), Some("/hl.css"));
        assert_eq!(config.page.preview_languages, vec!["vue", "tsx"]);
        assert_eq!(config.search.failure_policy, FailurePolicy::SkipAndReport);
        assert_eq!(config.search.unmatched_path_policy, UnmatchedPathPolicy::Reject);
        assert_eq!(config.search.mode, BuildMode::Production);
        assert_eq!(config.page.doc_class, "varlet-site-doc");
    }

    #[test]
    fn json_config() {
        let config =
            SiteConfig::from_json_str(r#"{"search":{"manifestId":"@idx","docsRoot":"packages"}}"#)
                .unwrap();
        assert_eq!(config.search.manifest_id, "@idx");
        assert_eq!(config.search.docs_root, "packages");
    }

    #[test]
    fn invalid_policy_is_a_config_error() {
        let err = SiteConfig::from_yaml_str("search:\n  failurePolicy: retry\n").unwrap_err();
        assert!(matches!(err, DocsError::Config(_)));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("site.json");
        std::fs::write(&json, r#"{"search":{"mode":"production"}}"#).unwrap();
        assert_eq!(SiteConfig::load(&json).unwrap().search.mode, BuildMode::Production);

        let yaml = dir.path().join("site.yml");
        std::fs::write(&yaml, "page:\n  cardClass: panel\n").unwrap();
        assert_eq!(SiteConfig::load(&yaml).unwrap().page.card_class, "panel");

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "page: [").unwrap();
        let err = SiteConfig::load(&broken).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
