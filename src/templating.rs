use std::{collections::HashMap, path::Path};

use tera::{Context, Result, Tera, Value};
use tracing::info;

use crate::{error::ConvertErr, fs::write_file, post::Post};

const TEMPLATE_NAME: &str = "front_matter.md";

const FRONT_MATTER: &str = r#"---
title: "{{ title | yaml_str }}"
author: "{{ author | yaml_str }}"
date: {{ date }}
lastmod: {{ lastmod }}
{% if draft %}draft: true
{% endif %}description: "{{ description | yaml_str }}"
subtitle: "{{ subtitle | yaml_str }}"
{% if tags %}tags:
{% for tag in tags %}  - "{{ tag | yaml_str }}"
{% endfor %}{% endif %}{% if featured_image %}image: "{{ featured_image | yaml_str }}"
{% endif %}{% if images %}images:
{% for image in images %}  - "{{ image | yaml_str }}"
{% endfor %}{% endif %}{% if canonical %}aliases:
  - "/{{ canonical | yaml_str }}"
{% endif %}---

{{ body }}
"#;

/// Escapes a string for a double quoted YAML scalar.
fn yaml_str(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    let val = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("yaml_str filter requires a string value"))?;
    let escaped = val
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    Ok(tera::to_value(escaped)?)
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Uses the built-in front matter unless a replacement template file is given.
    pub fn new(template: Option<&Path>) -> std::result::Result<Self, ConvertErr> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("yaml_str", yaml_str);
        match template {
            Some(path) => {
                info!("front matter template: {}", path.display());
                tera.add_template_file(path, Some(TEMPLATE_NAME))?;
            }
            None => tera.add_raw_template(TEMPLATE_NAME, FRONT_MATTER)?,
        }
        Ok(Self { tera })
    }

    pub fn render(&self, post: &Post) -> std::result::Result<String, ConvertErr> {
        let context = Context::from_serialize(post)?;
        let rendered = self.tera.render(TEMPLATE_NAME, &context)?;
        let mut out = rendered.trim_end().to_string();
        out.push('\n');
        Ok(out)
    }

    pub async fn write(&self, post: &Post, path: &Path) -> std::result::Result<(), ConvertErr> {
        let content = self.render(post)?;
        write_file(path, content.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn post() -> Post {
        Post {
            title: "The A/B Tests: \"Developer's\" Manual".into(),
            author: "Adrian B.G.".into(),
            date: "2018-09-25T14:13:46.823Z".into(),
            lastmod: "2024-01-01T00:00:00+00:00".into(),
            subtitle: "What every developer should know".into(),
            description: "A practical guide.".into(),
            canonical: "a-b-tests-developers-manual-f57f5c1a492".into(),
            full_url: "https://coder.today/a-b-tests-developers-manual-f57f5c1a492".into(),
            featured_image: Some("/posts/2018-09-25_ab-tests/images/2.jpeg".into()),
            images: vec![
                "/posts/2018-09-25_ab-tests/images/1.png".into(),
                "/posts/2018-09-25_ab-tests/images/2.jpeg".into(),
            ],
            tags: vec!["Testing".into(), "Software Development".into()],
            draft: false,
            is_comment: false,
            body: "Split testing is **simple**.".into(),
        }
    }

    #[test]
    fn full_front_matter() {
        let rendered = Renderer::new(None).unwrap().render(&post()).unwrap();
        assert_eq!(
            rendered,
            r#"---
title: "The A/B Tests: \"Developer's\" Manual"
author: "Adrian B.G."
date: 2018-09-25T14:13:46.823Z
lastmod: 2024-01-01T00:00:00+00:00
description: "A practical guide."
subtitle: "What every developer should know"
tags:
  - "Testing"
  - "Software Development"
image: "/posts/2018-09-25_ab-tests/images/2.jpeg"
images:
  - "/posts/2018-09-25_ab-tests/images/1.png"
  - "/posts/2018-09-25_ab-tests/images/2.jpeg"
aliases:
  - "/a-b-tests-developers-manual-f57f5c1a492"
---

Split testing is **simple**.
"#
        );
    }

    #[test]
    fn minimal_draft() {
        let post = Post {
            title: "Notes".into(),
            date: "2019-03-01T08:00:00.000Z".into(),
            lastmod: "2024-01-01T00:00:00+00:00".into(),
            draft: true,
            body: "Cache <invalidation> & naming.".into(),
            ..Default::default()
        };
        let rendered = Renderer::new(None).unwrap().render(&post).unwrap();
        assert_eq!(
            rendered,
            r#"---
title: "Notes"
author: ""
date: 2019-03-01T08:00:00.000Z
lastmod: 2024-01-01T00:00:00+00:00
draft: true
description: ""
subtitle: ""
---

Cache <invalidation> & naming.
"#
        );
    }

    #[test]
    fn custom_template_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "+++\ntitle = \"{{{{ title | yaml_str }}}}\"\n+++\n{{{{ body }}}}").unwrap();

        let renderer = Renderer::new(Some(file.path())).unwrap();
        assert_eq!(
            renderer.render(&post()).unwrap(),
            "+++\ntitle = \"The A/B Tests: \\\"Developer's\\\" Manual\"\n+++\nSplit testing is **simple**.\n"
        );
    }

    #[test]
    fn missing_template_file_is_an_error() {
        assert!(Renderer::new(Some(Path::new("does/not/exist.md"))).is_err());
    }

    #[tokio::test]
    async fn write_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts/bundle/index.md");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale content that is much longer than the new one").unwrap();

        Renderer::new(None).unwrap().write(&post(), &path).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("---\ntitle: "));
        assert!(!written.contains("stale"));
    }
}
