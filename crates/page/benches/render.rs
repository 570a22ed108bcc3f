use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdsite_page::{NoHighlight, PageOptions, render_page, render_page_with};

const DOC: &str = r#"# Button

### Basic Usage

```vue
import BasicUsage from '../example/BasicUsage.vue'
import Theme from '../example/Theme.vue'
```

Buttons trigger actions. Read `process.env.NODE_ENV` to check the mode.

### Loading

```js
// playground-ignore
import { Button } from '@varlet/ui'

createApp().use(Button)
```

## API

| Prop | Type | Default |
| --- | --- | --- |
| `type` | _string_ | `default` |
| `size` | _string_ | `normal` |
"#;

fn bench_render(c: &mut Criterion) {
    let options = PageOptions::default();
    c.bench_function("render_page/syntect", |b| {
        b.iter(|| render_page(black_box(DOC), &options))
    });
    c.bench_function("render_page/plain", |b| {
        b.iter(|| render_page_with(black_box(DOC), &options, &NoHighlight))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
