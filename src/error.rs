use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertErr {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} responded with status code {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Config file not valid: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("Invalid published date {date:?}: {source}")]
    Date {
        date: String,
        source: chrono::ParseError,
    },
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("{0}")]
    Message(String),
    #[error("{context}:\n {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ConvertErr>,
    },
}

impl From<String> for ConvertErr {
    fn from(msg: String) -> Self {
        ConvertErr::Message(msg)
    }
}

impl From<&str> for ConvertErr {
    fn from(msg: &str) -> Self {
        ConvertErr::Message(msg.to_string())
    }
}

pub trait ContextExt<T> {
    fn with_context<F>(self, context: F) -> Result<T, ConvertErr>
    where
        F: FnOnce() -> String;
}

impl<T, E> ContextExt<T> for Result<T, E>
where
    E: Into<ConvertErr>,
{
    fn with_context<F>(self, context: F) -> Result<T, ConvertErr>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| ConvertErr::Context {
            context: context(),
            source: Box::new(err.into()),
        })
    }
}
