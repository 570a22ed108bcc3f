//! Virtual modules serving the search index.
//!
//! The manifest module maps each locale to a lazy import of its own module;
//! each locale module exports the locale's sections as a JSON string.

use crate::section::Section;
use mdsite_core::DocsError;
use mdsite_page::codegen::{js_single_quoted, js_string_literal};
use std::collections::HashMap;

/// Module handle for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleModule {
    /// Locale identifier.
    pub locale: String,
    /// Import specifier (`@localSearchIndexen-US`).
    pub module_id: String,
    /// Resolved request path (`/@localSearchIndexen-US`).
    pub request_path: String,
}

/// Locale modules of one snapshot, with reverse lookup by request path.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<LocaleModule>,
    by_request_path: HashMap<String, usize>,
}

impl ModuleRegistry {
    /// Registers one module per locale.
    ///
    /// The empty locale is not registered since its module id would be the
    /// manifest id itself.
    pub fn new<'a>(manifest_id: &str, locales: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self {
            modules: Vec::new(),
            by_request_path: HashMap::new(),
        };
        for locale in locales {
            if locale.is_empty() {
                log::warn!("sections without a locale are not served as a module");
                continue;
            }
            let module_id = format!("{manifest_id}{locale}");
            let request_path = request_path(&module_id);
            registry
                .by_request_path
                .insert(request_path.clone(), registry.modules.len());
            registry.modules.push(LocaleModule {
                locale: locale.to_string(),
                module_id,
                request_path,
            });
        }
        registry
    }

    /// Registered locale modules in locale order.
    pub fn modules(&self) -> &[LocaleModule] {
        &self.modules
    }

    /// Module of the locale served at `request_path`.
    pub fn lookup(&self, request_path: &str) -> Option<&LocaleModule> {
        self.by_request_path
            .get(request_path)
            .map(|&index| &self.modules[index])
    }

    /// Source of the manifest module.
    ///
    /// ```
    /// use mdsite_search::modules::ModuleRegistry;
    ///
    /// let registry = ModuleRegistry::new("@localSearchIndex", ["en-US", "zh-CN"]);
    /// assert_eq!(
    ///     registry.manifest_module(),
    ///     "export default {\"en-US\": () => import('@localSearchIndexen-US'),\"zh-CN\": () => import('@localSearchIndexzh-CN')}"
    /// );
    /// ```
    pub fn manifest_module(&self) -> String {
        let records: Vec<String> = self
            .modules
            .iter()
            .map(|module| {
                format!(
                    "{}: () => import({})",
                    js_string_literal(&module.locale),
                    js_single_quoted(&module.module_id)
                )
            })
            .collect();
        format!("export default {{{}}}", records.join(","))
    }
}

/// Request path a module id resolves to.
pub fn request_path(module_id: &str) -> String {
    format!("/{module_id}")
}

/// Source of a locale module.
///
/// The sections are JSON-encoded and the JSON text is exported as a string
/// literal. An unknown locale exports the `{}` sentinel.
pub fn locale_module(sections: Option<&[Section]>) -> Result<String, DocsError> {
    let json = match sections {
        Some(sections) => serde_json::to_string(sections)?,
        None => "{}".to_string(),
    };
    Ok(format!("export default {}", serde_json::to_string(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_maps_request_paths_to_locales() {
        let registry = ModuleRegistry::new("@localSearchIndex", ["en-US", "zh-CN"]);
        let module = registry.lookup("/@localSearchIndexzh-CN").unwrap();
        assert_eq!(module.locale, "zh-CN");
        assert_eq!(module.module_id, "@localSearchIndexzh-CN");
        assert!(registry.lookup("/@localSearchIndexja").is_none());
        assert!(registry.lookup("/@localSearchIndex").is_none());
    }

    #[test]
    fn empty_locale_is_not_registered() {
        let registry = ModuleRegistry::new("@localSearchIndex", ["", "en-US"]);
        assert_eq!(registry.modules().len(), 1);
        assert_eq!(
            registry.manifest_module(),
            "export default {\"en-US\": () => import('@localSearchIndexen-US')}"
        );
    }

    #[test]
    fn manifest_escapes_module_ids() {
        let registry = ModuleRegistry::new("@localSearchIndex", ["x')+alert(1);('"]);
        assert_eq!(
            registry.manifest_module(),
            r#"export default {"x')+alert(1);('": () => import('@localSearchIndexx\')+alert(1);(\'')}"#
        );
    }

    #[test]
    fn empty_manifest() {
        let registry = ModuleRegistry::new("@localSearchIndex", std::iter::empty());
        assert_eq!(registry.manifest_module(), "export default {}");
    }

    #[test]
    fn locale_module_is_double_encoded() {
        let sections = vec![Section {
            level: "3".into(),
            anchor: "a".into(),
            title: "A \"q\"".into(),
            content: "c".into(),
            tokens: "A q c".into(),
            component_id: "button".into(),
        }];
        let module = locale_module(Some(sections.as_slice())).unwrap();
        let literal = module.strip_prefix("export default ").unwrap();
        let json: String = serde_json::from_str(literal).unwrap();
        let decoded: Vec<Section> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sections);
    }

    #[test]
    fn unknown_locale_exports_sentinel() {
        assert_eq!(locale_module(None).unwrap(), "export default \"{}\"");
        assert_eq!(locale_module(Some(&[][..])).unwrap(), "export default \"[]\"");
    }
}
