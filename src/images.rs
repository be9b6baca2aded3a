use std::path::Path;

use reqwest::Client;
use scraper::{Html, Node};
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::ConvertErr,
    fs::write_file,
    post::Destination,
    selectors::Selectors,
};

/// Images saved for one post, in document order.
#[derive(Debug, Default, PartialEq)]
pub struct SavedImages {
    pub images: Vec<String>,
    pub featured: Option<String>,
}

struct ImageSource {
    index: usize,
    src: Option<String>,
    featured: bool,
}

/// Extension of the last path segment, `png` for `https://cdn.test/max/800/1_abc.png?q=1`.
pub fn extension(src: &str) -> Option<String> {
    let url = Url::parse(src).ok()?;
    let name = url.path_segments()?.next_back()?;
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_string()),
        _ => None,
    }
}

pub fn file_name(index: usize, src: &str) -> String {
    match extension(src) {
        Some(ext) => format!("{index}.{ext}"),
        None => index.to_string(),
    }
}

pub async fn download(client: &Client, url: &str, destination: &Path) -> Result<(), ConvertErr> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ConvertErr::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let bytes = response.bytes().await?;
    write_file(destination, &bytes).await
}

/// Downloads every `img` of the document into the images folder of the post and points
/// its `src` at the published copy.
///
/// A failing image is logged and left untouched. Without an explicitly featured image the
/// first saved one is featured.
pub async fn fetch_and_replace(
    doc: &mut Html,
    selectors: &Selectors,
    client: &Client,
    destination: &Destination,
) -> Result<SavedImages, ConvertErr> {
    let sources: Vec<ImageSource> = doc
        .select(&selectors.image)
        .enumerate()
        .map(|(i, img)| ImageSource {
            index: i + 1,
            src: img.value().attr("src").map(str::to_string),
            featured: img.value().attr("data-is-featured").is_some(),
        })
        .collect();

    let mut saved = SavedImages::default();
    if sources.is_empty() {
        return Ok(saved);
    }

    let mut rewrites: Vec<Option<String>> = Vec::with_capacity(sources.len());
    for source in sources {
        let Some(src) = source.src else {
            warn!("image {} has no src", source.index);
            rewrites.push(None);
            continue;
        };
        let name = file_name(source.index, &src);
        let disk_path = destination.images_folder.join(&name);
        let published = format!("{}/{name}", destination.published_images);

        if let Err(e) = download(client, &src, &disk_path).await {
            warn!("image {src} skipped: {e}");
            rewrites.push(None);
            continue;
        }
        debug!("saved image {src} => {}", disk_path.display());

        if source.featured {
            saved.featured = Some(published.clone());
        }
        saved.images.push(published.clone());
        rewrites.push(Some(published));
    }

    let ids: Vec<_> = doc.select(&selectors.image).map(|img| img.id()).collect();
    for (id, rewrite) in ids.into_iter().zip(rewrites) {
        let (Some(published), Some(mut node)) = (rewrite, doc.tree.get_mut(id)) else {
            continue;
        };
        if let Node::Element(element) = node.value() {
            for (name, value) in element.attrs.iter_mut() {
                if &*name.local == "src" {
                    *value = published.as_str().into();
                }
            }
        }
    }

    if saved.featured.is_none() {
        saved.featured = saved.images.first().cloned();
    }
    Ok(saved)
}
