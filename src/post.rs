use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{config::Layout, error::ConvertErr};

#[derive(Debug, PartialEq, Serialize, Default, Clone)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub date: String,
    pub lastmod: String,
    pub subtitle: String,
    pub description: String,
    pub canonical: String,
    pub full_url: String,
    pub featured_image: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub is_comment: bool,
    pub body: String,
}

pub fn is_draft(file_name: &str, prefix: &str) -> bool {
    file_name.starts_with(prefix)
}

/// `2018-09-25T14:13:46.823Z` becomes `2018-09-25`.
pub fn date_prefix(date: &str) -> &str {
    date.split('T').next().unwrap_or_default()
}

/// Where a single post ends up on disk and under which path it is published.
#[derive(Debug, PartialEq, Clone)]
pub struct Destination {
    pub bundle: String,
    pub folder: PathBuf,
    pub markdown: PathBuf,
    pub images_folder: PathBuf,
    pub published_images: String,
}

impl Destination {
    pub fn new(
        output: &Path,
        content_type: &str,
        post: &Post,
        slug: &str,
        layout: Layout,
    ) -> Result<Self, ConvertErr> {
        let prefix = if post.draft {
            "draft"
        } else {
            let prefix = date_prefix(&post.date);
            NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|source| ConvertErr::Date {
                date: post.date.clone(),
                source,
            })?;
            prefix
        };
        let bundle = format!("{prefix}_{slug}");
        let section = output.join(content_type);
        let folder = section.join(&bundle);
        let markdown = match layout {
            Layout::Bundle => folder.join("index.md"),
            Layout::Flat => section.join(format!("{bundle}.md")),
        };
        Ok(Self {
            images_folder: folder.join("images"),
            published_images: format!("/{content_type}/{bundle}/images"),
            markdown,
            folder,
            bundle,
        })
    }
}
