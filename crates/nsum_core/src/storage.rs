use async_trait::async_trait;

use crate::types::{CacheStats, ProcessedArticle};
use crate::Result;

/// Persistent cache of processed articles, one record per URL.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Returns true if a record exists for this exact URL
    async fn exists(&self, url: &str) -> Result<bool>;

    /// Fetch the record stored for this URL
    async fn get(&self, url: &str) -> Result<Option<ProcessedArticle>>;

    /// Insert a new record. Fails with `Error::DuplicateUrl` if the URL is already stored.
    async fn put(&self, article: &ProcessedArticle) -> Result<()>;

    /// Records ordered by processing time, most recent first
    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProcessedArticle>>;

    async fn stats(&self) -> Result<CacheStats>;

    /// Delete every record, returning how many were removed
    async fn clear(&self) -> Result<u64>;
}

/// Checks the fields a record must carry before it can be persisted.
pub fn validate_for_storage(article: &ProcessedArticle) -> Result<()> {
    let required = [
        ("url", article.url.as_str()),
        ("source", article.source.as_str()),
        ("title", article.title.as_str()),
        ("original_text", article.original_text.as_str()),
        ("summary", article.summary.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(crate::Error::InvalidArticle(format!("missing required field: {}", field)));
        }
    }
    Ok(())
}
