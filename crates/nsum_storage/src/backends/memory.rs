use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nsum_core::storage::validate_for_storage;
use nsum_core::{ArticleStore, CacheStats, Error, ProcessedArticle, Result};
use tokio::sync::RwLock;

struct StoredArticle {
    id: i64,
    article: ProcessedArticle,
}

#[derive(Default)]
pub struct MemoryStore {
    rows: Vec<StoredArticle>,
    /// URL to position in `rows`.
    by_url: HashMap<String, usize>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, url: &str) -> Option<&StoredArticle> {
        self.by_url.get(url).map(|&idx| &self.rows[idx])
    }

    pub fn insert(&mut self, article: &ProcessedArticle) -> Result<i64> {
        validate_for_storage(article)?;
        if self.by_url.contains_key(&article.url) {
            return Err(Error::DuplicateUrl(article.url.clone()));
        }
        self.next_id += 1;
        self.by_url.insert(article.url.clone(), self.rows.len());
        self.rows.push(StoredArticle {
            id: self.next_id,
            article: article.clone(),
        });
        Ok(self.next_id)
    }

    pub fn clear(&mut self) -> u64 {
        let count = self.rows.len() as u64;
        self.rows.clear();
        self.by_url.clear();
        count
    }

    pub fn recent(&self, limit: Option<usize>) -> Vec<ProcessedArticle> {
        let mut rows: Vec<&StoredArticle> = self.rows.iter().collect();
        rows.sort_by_key(|row| Reverse((row.article.processed_at, row.id)));
        rows.into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|row| row.article.clone())
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            total: self.rows.len() as u64,
            ..Default::default()
        };
        for row in &self.rows {
            *stats
                .by_language
                .entry(row.article.language.code().to_string())
                .or_insert(0) += 1;
            *stats.by_source.entry(row.article.source.clone()).or_insert(0) += 1;
        }
        stats
    }
}

/// Process-local store, lost on exit.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn exists(&self, url: &str) -> Result<bool> {
        Ok(self.store.read().await.find(url).is_some())
    }

    async fn get(&self, url: &str) -> Result<Option<ProcessedArticle>> {
        Ok(self.store.read().await.find(url).map(|row| row.article.clone()))
    }

    async fn put(&self, article: &ProcessedArticle) -> Result<()> {
        self.store.write().await.insert(article).map(|_| ())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProcessedArticle>> {
        Ok(self.store.read().await.recent(limit))
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(self.store.read().await.stats())
    }

    async fn clear(&self) -> Result<u64> {
        Ok(self.store.write().await.clear())
    }
}
