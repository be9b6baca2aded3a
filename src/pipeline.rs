use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use chrono::{Local, SecondsFormat};
use reqwest::Client;
use scraper::Html;
use tokio::fs::read_to_string;
use tracing::{debug, error, info, warn};

use crate::{
    cleanup::cleanup,
    config::{Config, Layout},
    error::{ContextExt, ConvertErr},
    fs::{ensure_dir, has_ext, read_dir_sorted, recreate_dir, remove_dir_if_exists},
    images::fetch_and_replace,
    markdown::BodyConverter,
    metadata::extract,
    post::{Destination, is_draft},
    req::get_client,
    selectors::Selectors,
    slug::Slugger,
    tags::fetch_tags,
    templating::Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Extension,
    EmptyTitle,
    Comment,
    EmptyBody,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Extension => write!(f, "ext"),
            SkipReason::EmptyTitle => write!(f, "empty title"),
            SkipReason::Comment => write!(f, "comment"),
            SkipReason::EmptyBody => write!(f, "empty body"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Counters logged at the end of a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Everything needed to turn one exported file into a Markdown page, built once per run.
pub struct Converter {
    config: Config,
    output: PathBuf,
    content_type: String,
    client: Client,
    selectors: Selectors,
    slugger: Slugger,
    body: BodyConverter,
    renderer: Renderer,
}

impl Converter {
    pub fn new(config: Config, output: PathBuf, content_type: String) -> Result<Self, ConvertErr> {
        Ok(Self {
            client: get_client(&config)?,
            selectors: Selectors::new()?,
            slugger: Slugger::new()?,
            body: BodyConverter::new(config.strip_title_heading),
            renderer: Renderer::new(config.template.as_deref())?,
            config,
            output,
            content_type,
        })
    }

    /// Converts every exported post of `input`. Only listing the input and creating the
    /// output root abort the run, everything else is logged per file.
    pub async fn run(&self, input: &Path) -> Result<Summary, ConvertErr> {
        let files = read_dir_sorted(input).await?;
        ensure_dir(&self.output).await?;

        let mut summary = Summary {
            found: files.len(),
            ..Default::default()
        };
        info!("Found {} articles.", summary.found);

        for path in files {
            let name = file_name(&path);
            match self.process_file(&path).await {
                Ok(Outcome::Written(destination)) => {
                    summary.written += 1;
                    info!("Processed {name} => {}", destination.display());
                }
                Ok(Outcome::Skipped(reason)) => {
                    summary.skipped += 1;
                    info!("Ignoring ({reason}) {name}");
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Error {name}: {e}");
                }
            }
        }

        info!(
            "Done: {} written, {} ignored, {} failed.",
            summary.written, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    pub async fn process_file(&self, path: &Path) -> Result<Outcome, ConvertErr> {
        if !has_ext(path, &self.config.html_extension).await {
            return Ok(Outcome::Skipped(SkipReason::Extension));
        }
        let html = read_to_string(path)
            .await
            .with_context(|| format!("read file: {}", path.display()))?;
        let draft = is_draft(&file_name(path), &self.config.draft_prefix);
        self.convert(Html::parse_document(&html), draft).await
    }

    async fn convert(&self, mut doc: Html, draft: bool) -> Result<Outcome, ConvertErr> {
        let mut post = extract(&doc, &self.selectors, self.config.comment_rule);
        post.draft = draft;
        post.lastmod = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        if post.title.is_empty() {
            return Ok(Outcome::Skipped(SkipReason::EmptyTitle));
        }
        if post.is_comment && !post.draft {
            return Ok(Outcome::Skipped(SkipReason::Comment));
        }

        cleanup(&mut doc, &self.selectors);

        if !post.draft && self.config.fetch_tags {
            post.tags = self.tags(&post.full_url).await;
        }

        let slug = self.slugger.slug(&post.title);
        let destination = Destination::new(
            &self.output,
            &self.content_type,
            &post,
            &slug,
            self.config.layout,
        )?;
        recreate_dir(&destination.folder).await?;

        if self.config.download_images {
            match fetch_and_replace(&mut doc, &self.selectors, &self.client, &destination).await
            {
                Ok(saved) => {
                    post.images = saved.images;
                    post.featured_image = saved.featured;
                }
                Err(e) => warn!("images of {}: {e}", destination.bundle),
            }
        }

        post.body = self.body.convert(&doc, &self.selectors, &post.title)?;
        if post.body.is_empty() {
            remove_dir_if_exists(&destination.folder).await?;
            return Ok(Outcome::Skipped(SkipReason::EmptyBody));
        }

        if self.config.layout == Layout::Flat && post.images.is_empty() {
            remove_dir_if_exists(&destination.folder).await?;
        }
        self.renderer.write(&post, &destination.markdown).await?;
        Ok(Outcome::Written(destination.markdown))
    }

    async fn tags(&self, url: &str) -> Vec<String> {
        if url.is_empty() {
            debug!("no canonical url, tags skipped");
            return Vec::new();
        }
        match fetch_tags(&self.client, url, &self.selectors).await {
            Ok(tags) => {
                debug!("{} tags from {url}", tags.len());
                tags
            }
            Err(e) => {
                warn!("error tags: {e}");
                Vec::new()
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
