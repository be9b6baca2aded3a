//! Rewrites of export markup the Markdown converter cannot handle or that
//! duplicates front matter. Every step tolerates documents without matches.
use scraper::{Html, Node, Selector, node::Text};
use tracing::debug;

use crate::selectors::Selectors;

/// Embed previews are an anchor wrapping `<strong>title</strong><br><em>description</em>host`.
/// Only the title is kept.
pub fn collapse_embed_previews(doc: &mut Html, selectors: &Selectors) {
    let targets: Vec<_> = doc
        .select(&selectors.embed_anchor)
        .filter_map(|anchor| {
            let mut titles = anchor.select(&selectors.embed_title).peekable();
            titles.peek()?;
            let title: String = titles.flat_map(|strong| strong.text()).collect();
            Some((anchor.id(), title.trim().to_string()))
        })
        .collect();

    for (id, title) in targets {
        let Some(mut anchor) = doc.tree.get_mut(id) else {
            continue;
        };
        while let Some(mut child) = anchor.first_child() {
            child.detach();
        }
        anchor.append(Node::Text(Text {
            text: title.as_str().into(),
        }));
    }
}

fn remove_all(doc: &mut Html, selector: &Selector) -> usize {
    let ids: Vec<_> = doc.select(selector).map(|el| el.id()).collect();
    let removed = ids.len();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
    removed
}

/// Thumbnail links next to embed previews carry no text.
pub fn remove_embed_thumbnails(doc: &mut Html, selectors: &Selectors) {
    let removed = remove_all(doc, &selectors.embed_thumbnail);
    debug!("removed {removed} embed thumbnails");
}

/// The title is already part of the front matter.
pub fn remove_title_headings(doc: &mut Html, selectors: &Selectors) {
    let removed = remove_all(doc, &selectors.title_headings);
    debug!("removed {removed} title headings");
}

pub fn cleanup(doc: &mut Html, selectors: &Selectors) {
    collapse_embed_previews(doc, selectors);
    remove_embed_thumbnails(doc, selectors);
    remove_title_headings(doc, selectors);
}
