use std::{
    fs::File,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{ContextExt, ConvertErr};

/// Rule deciding whether an exported post is a reply rather than an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentRule {
    /// No image aspect placeholder anywhere in the document.
    #[default]
    MissingImagePlaceholder,
    /// Both subtitle and description are empty.
    MissingSummary,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// `<bundle>/index.md`
    #[default]
    Bundle,
    /// `<bundle>.md` next to the bundle directory
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub comment_rule: CommentRule,
    pub strip_title_heading: bool,
    pub layout: Layout,
    pub fetch_tags: bool,
    pub download_images: bool,
    pub draft_prefix: String,
    pub html_extension: String,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_rule: CommentRule::default(),
            strip_title_heading: true,
            layout: Layout::default(),
            fetch_tags: true,
            download_images: true,
            draft_prefix: "draft_".to_string(),
            html_extension: "html".to_string(),
            request_timeout_secs: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            template: None,
        }
    }
}

impl TryFrom<&Path> for Config {
    type Error = ConvertErr;
    fn try_from(path: &Path) -> Result<Self, ConvertErr> {
        let f = File::open(path).with_context(|| format!("config file: {path:?}"))?;
        serde_yaml::from_reader(f).with_context(|| format!("config file: {path:?}"))
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConvertErr> {
        match path {
            Some(path) => Config::try_from(path),
            None => Ok(Config::default()),
        }
    }
}
