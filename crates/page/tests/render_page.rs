use mdsite_page::{PageOptions, render_page};

const BUTTON_DOC: &str = r#"# Button

### Basic Usage

```vue
import BasicUsage from '../example/BasicUsage.vue'
import Theme from "../example/Theme.vue"
```

### Ignored Sample

```js
// playground-ignore
const a = 1
```

### Shell

```sh
npm i @varlet/ui
```

## API

Props are listed below.
"#;

fn template_of(page: &str) -> &str {
    let start = page.find("<template>").unwrap();
    let end = page.rfind("</template>").unwrap();
    &page[start..end]
}

#[test]
fn page_has_template_and_script_regions() {
    let page = render_page(BUTTON_DOC, &PageOptions::default()).unwrap();
    assert!(page.starts_with("\n<template><div class=\"varlet-site-doc\">"));
    assert!(page.contains("<script>\nimport BasicUsage from '../example/BasicUsage.vue'\nimport Theme from \"../example/Theme.vue\"\n\nexport default {"));
    assert!(page.contains("    'basic-usage': BasicUsage,\n    'theme': Theme\n"));
    assert!(page.ends_with("</script>\n"));
}

#[test]
fn every_h3_is_a_linkable_card() {
    let page = render_page(BUTTON_DOC, &PageOptions::default()).unwrap();
    let template = template_of(&page);
    for title in ["Basic Usage", "Ignored Sample", "Shell"] {
        let heading = format!(
            "<h3 id=\"{title}\"><router-link to=\"#{title}\">#</router-link>{title}</h3>"
        );
        assert!(template.contains(&heading), "missing heading for {title}");
    }
    assert_eq!(template.matches("<div class=\"card\">").count(), 3);
    assert!(template.contains("</div><h2>API</h2>"));
}

#[test]
fn highlighted_samples_are_wrapped_for_the_playground() {
    let page = render_page(BUTTON_DOC, &PageOptions::default()).unwrap();
    assert_eq!(page.matches("<var-site-code-example playground-ignore>").count(), 1);
    assert_eq!(page.matches("<var-site-code-example>").count(), 1);
    assert!(!page.contains("// playground-ignore"));
    assert!(page.contains("<pre class=\"hljs\"><code v-pre=\"\">"));
}

#[test]
fn stylesheet_link_is_emitted_per_block() {
    let options = PageOptions {
        style: Some("/highlight/github.css".into()),
        ..PageOptions::default()
    };
    let page = render_page(BUTTON_DOC, &options).unwrap();
    assert_eq!(
        page.matches("<link class=\"hljs-style\" rel=\"stylesheet\" href=\"/highlight/github.css\"/>")
            .count(),
        2
    );
}

#[test]
fn unknown_language_renders_plain_block_without_annotation() {
    let page = render_page("```no-such-lang\nx < y\n```\n", &PageOptions::default()).unwrap();
    assert!(page.contains("<pre><code class=\"language-no-such-lang\" v-pre=\"\">x &lt; y\n</code></pre>"));
    assert!(!page.contains("var-site-code-example"));
}

#[test]
fn shell_sample_marker_is_stripped_with_bundled_highlighter() {
    let source = "### Install\n\n```shell\n# playground-ignore\nnpm i @varlet/ui -S\n```\n";
    let page = render_page(source, &PageOptions::default()).unwrap();
    let body = template_of(&page);
    assert!(body.contains("<var-site-code-example playground-ignore><pre class=\"hljs\">"));
    assert!(!body.contains("language-shell"));
    assert_eq!(body.matches("playground-ignore").count(), 1);
    assert!(body.contains("npm"));
}
