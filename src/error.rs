use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a harvest run
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid topic reference `{0}`")]
    InvalidTopic(String),

    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to connect to WebDriver at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    #[error("no page available for {0}")]
    PageNotFound(String),

    #[error("WebDriver session error: {0}")]
    Session(#[source] fantoccini::error::CmdError),

    #[error("navigation to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("failed to serialize entries: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarvestError {
    pub(crate) fn invalid_url(url: &str, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
