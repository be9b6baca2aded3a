use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder with the exported HTML posts.
    pub input: PathBuf,
    /// Destination folder, usually the content folder of the site.
    pub output: PathBuf,
    /// Content type, used as the sub folder of the output and in published image paths.
    #[clap(default_value = "posts")]
    pub content_type: String,
    /// Optional YAML configuration file.
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}
