use thiserror::Error;

use crate::types::UnsupportedReason;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The store already holds a record for this URL.
    #[error("Article already cached: {0}")]
    DuplicateUrl(String),

    #[error("Invalid article: {0}")]
    InvalidArticle(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Language detection failed: {0}")]
    LanguageDetection(UnsupportedReason),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for a persistence conflict on an already cached URL.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicateUrl(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
