pub mod args;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod fs;
pub mod images;
pub mod markdown;
pub mod metadata;
pub mod pipeline;
pub mod post;
pub mod req;
pub mod selectors;
pub mod slug;
pub mod tags;
pub mod templating;

use args::Args;
use clap::Parser;
use config::Config;
use error::ConvertErr;
use pipeline::Converter;
use tracing::debug;
use tracing_log::LogTracer;

fn init_tracing(args: &Args) -> Result<(), ConvertErr> {
    LogTracer::init().map_err(|e| ConvertErr::Message(e.to_string()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ConvertErr::Message(e.to_string()))
}

async fn run(args: Args) -> Result<(), ConvertErr> {
    init_tracing(&args)?;
    let config = Config::load(args.config.as_deref())?;
    debug!("{config:?}");
    let converter = Converter::new(config, args.output, args.content_type)?;
    converter.run(&args.input).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run(Args::parse()).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
