use std::time::Duration;

use crate::{config::Config, error::ConvertErr};

/// Client shared by the tag fetcher and the image downloader.
///
/// Without `request_timeout_secs` requests may wait forever on an unresponsive host.
pub fn get_client(config: &Config) -> Result<reqwest::Client, ConvertErr> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
