use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Must provide either the --channel flag or set `channel` in {0}")]
    MissingChannel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for MonitorError {
    fn from(err: quick_xml::Error) -> Self {
        MonitorError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
