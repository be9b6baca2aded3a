use htmd::HtmlToMarkdown;
use scraper::Html;

use crate::{
    error::{ContextExt, ConvertErr},
    selectors::Selectors,
};

pub struct BodyConverter {
    converter: HtmlToMarkdown,
    strip_title_heading: bool,
}

impl BodyConverter {
    pub fn new(strip_title_heading: bool) -> Self {
        Self {
            converter: HtmlToMarkdown::builder()
                .skip_tags(vec!["script", "style"])
                .build(),
            strip_title_heading,
        }
    }

    /// Markdown of every content section in document order.
    pub fn convert(
        &self,
        doc: &Html,
        selectors: &Selectors,
        title: &str,
    ) -> Result<String, ConvertErr> {
        let mut sections = Vec::new();
        for section in doc.select(&selectors.section) {
            let html = section.inner_html();
            let markdown = self
                .converter
                .convert(html.trim())
                .with_context(|| "convert section to markdown".to_string())?;
            let markdown = markdown.trim();
            if !markdown.is_empty() {
                sections.push(markdown.to_string());
            }
        }
        let body = sections.join("\n\n").replace('\u{a0}', " ");
        let body = body.trim();

        if self.strip_title_heading {
            return Ok(strip_heading(body, title).to_string());
        }
        Ok(body.to_string())
    }
}

/// Drops a leading `### <title>` line.
fn strip_heading<'a>(body: &'a str, title: &str) -> &'a str {
    let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
    if first.trim_end() == format!("### {title}") {
        rest.trim_start()
    } else {
        body
    }
}
