//! Component and locale derived from a document path.

use std::path::Path;

/// Owning component and locale of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmpAndLocale {
    /// Component folder name.
    pub component: String,
    /// Locale taken from the document file name.
    pub locale: String,
}

/// Derives component and locale from `<root>/<component>/docs/<locale>.md`.
///
/// The pattern may appear anywhere in the path; each segment is the shortest
/// match, and either may be empty. Returns `None` when the pattern is absent.
///
/// # Examples
///
/// ```
/// use mdsite_search::path::cmp_and_locale;
/// use std::path::Path;
///
/// let found = cmp_and_locale(Path::new("/repo/src/button/docs/zh-CN.md"), "src").unwrap();
/// assert_eq!(found.component, "button");
/// assert_eq!(found.locale, "zh-CN");
/// assert!(cmp_and_locale(Path::new("/repo/README.md"), "src").is_none());
/// ```
pub fn cmp_and_locale(path: &Path, root: &str) -> Option<CmpAndLocale> {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let root = root.trim_end_matches('/');
    let prefix = format!("{root}/");

    normalized
        .match_indices(&prefix)
        .find_map(|(start, _)| match_after_root(&normalized[start + prefix.len()..]))
}

fn match_after_root(rest: &str) -> Option<CmpAndLocale> {
    const DOCS: &str = "/docs/";
    let docs = rest.find(DOCS)?;
    let component = &rest[..docs];
    let after_docs = &rest[docs + DOCS.len()..];
    let locale = &after_docs[..after_docs.find(".md")?];
    Some(CmpAndLocale {
        component: component.to_string(),
        locale: locale.to_string(),
    })
}
