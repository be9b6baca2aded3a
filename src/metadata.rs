use scraper::{Html, Selector};

use crate::{config::CommentRule, post::Post, selectors::Selectors};

fn first_text(doc: &Html, selector: &Selector) -> String {
    doc.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> String {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

/// Last path segment of `https://coder.today/a-b-tests-developers-manual-f57f5c1a492`.
///
/// Values with fewer than three `/` separated pieces are kept whole.
pub fn canonical_fragment(href: &str) -> &str {
    let pieces: Vec<&str> = href.split('/').collect();
    if pieces.len() > 2 {
        pieces[pieces.len() - 1]
    } else {
        href
    }
}

pub fn is_comment(doc: &Html, selectors: &Selectors, post: &Post, rule: CommentRule) -> bool {
    match rule {
        CommentRule::MissingImagePlaceholder => {
            doc.select(&selectors.image_placeholder).next().is_none()
        }
        CommentRule::MissingSummary => post.subtitle.is_empty() && post.description.is_empty(),
        CommentRule::Never => false,
    }
}

/// Fills the scalar fields of a post. Missing elements leave fields empty.
pub fn extract(doc: &Html, selectors: &Selectors, rule: CommentRule) -> Post {
    let full_url = first_attr(doc, &selectors.canonical, "href");
    let mut post = Post {
        title: first_text(doc, &selectors.title),
        author: first_text(doc, &selectors.author),
        date: first_attr(doc, &selectors.time, "datetime"),
        subtitle: first_text(doc, &selectors.subtitle),
        description: first_text(doc, &selectors.description),
        canonical: canonical_fragment(&full_url).to_string(),
        full_url,
        ..Default::default()
    };
    post.is_comment = is_comment(doc, selectors, &post, rule);
    post
}
