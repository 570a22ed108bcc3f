use mdsite_search::{DocsPlugin, GlobSource, SiteConfig};
use std::fs;
use std::path::Path;

const BUTTON_EN: &str = r#"# Button

### Basic Usage

```vue
import BasicUsage from '../example/BasicUsage.vue'
```

Buttons trigger an action.

### Size

Use `size` to pick &amp; scale.

## API
"#;

const BUTTON_ZH: &str = "# 按钮\n\n### 基本使用\n\n按钮用于触发一个操作。\n";

const CELL_EN: &str = "# Cell\n\n### Basic Usage\n\nA row of content.\n\n### Empty\n\n### Border\n\nShow a divider.\n";

fn write_doc(root: &Path, component: &str, locale: &str, body: &str) {
    let docs = root.join(component).join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join(format!("{locale}.md")), body).unwrap();
}

fn site() -> (tempfile::TempDir, DocsPlugin) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("src");
    write_doc(&root, "button", "en-US", BUTTON_EN);
    write_doc(&root, "button", "zh-CN", BUTTON_ZH);
    write_doc(&root, "cell", "en-US", CELL_EN);
    let plugin = DocsPlugin::new(SiteConfig::default(), GlobSource::component_docs(&root));
    (dir, plugin)
}

#[test]
fn one_locale_key_per_locale_in_discovery_order() {
    let (_dir, plugin) = site();
    let report = plugin.configure_server().unwrap();
    assert_eq!(report.documents, 3);
    assert!(report.failures.is_empty());

    let snapshot = plugin.index().snapshot();
    assert_eq!(snapshot.locales().collect::<Vec<_>>(), vec!["en-US", "zh-CN"]);

    let en: Vec<(&str, &str)> = snapshot
        .sections("en-US")
        .unwrap()
        .iter()
        .map(|s| (s.component_id.as_str(), s.anchor.as_str()))
        .collect();
    assert_eq!(
        en,
        vec![
            ("button", "Basic Usage"),
            ("button", "Size"),
            ("cell", "Basic Usage"),
            ("cell", "Border"),
        ]
    );
}

#[test]
fn section_text_is_flattened_and_tokenized() {
    let (_dir, plugin) = site();
    plugin.configure_server().unwrap();
    let snapshot = plugin.index().snapshot();

    let size = &snapshot.sections("en-US").unwrap()[1];
    assert_eq!(size.level, "3");
    assert_eq!(size.content, "Use size to pick & scale. API");
    assert!(size.tokens.starts_with("Size Use size"));

    let zh = &snapshot.sections("zh-CN").unwrap()[0];
    assert_eq!(zh.title, "基本使用");
    assert_eq!(zh.content, "按钮用于触发一个操作。");
    assert!(zh.tokens.split(' ').count() > 2);
    assert!(zh.tokens.contains("按钮"));
}

#[test]
fn served_modules_match_the_snapshot() {
    let (_dir, plugin) = site();
    plugin.configure_server().unwrap();

    let manifest = plugin.load("/@localSearchIndex").unwrap().unwrap();
    assert_eq!(
        manifest,
        "export default {\"en-US\": () => import('@localSearchIndexen-US'),\"zh-CN\": () => import('@localSearchIndexzh-CN')}"
    );

    let id = plugin.resolve_id("@localSearchIndexen-US").unwrap();
    let module = plugin.load(&id).unwrap().unwrap();
    let literal = module.strip_prefix("export default ").unwrap();
    let json: String = serde_json::from_str(literal).unwrap();
    let sections: Vec<mdsite_search::Section> = serde_json::from_str(&json).unwrap();
    assert_eq!(sections.as_slice(), plugin.index().snapshot().sections("en-US").unwrap());
}

#[test]
fn rebuild_replaces_the_whole_index() {
    let (dir, plugin) = site();
    plugin.configure_server().unwrap();
    let before = plugin.index().snapshot();

    fs::remove_dir_all(dir.path().join("src").join("button")).unwrap();
    plugin.configure_server().unwrap();
    let after = plugin.index().snapshot();

    assert_eq!(before.section_count(), 5);
    assert_eq!(after.locales().collect::<Vec<_>>(), vec!["en-US"]);
    assert_eq!(after.section_count(), 2);
}
