use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use nsum_core::{ArticleStore, ProcessedArticle, RawArticle, Result};
use tracing::{debug, info, warn};

use crate::orchestrator::Orchestrator;

/// How a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the store; no model ran.
    Hit,
    /// Not cached yet, computed now.
    Miss,
    /// Recomputed because the caller asked to bypass the cache.
    Refreshed,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
            CacheStatus::Refreshed => "refreshed",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub article: ProcessedArticle,
    pub cache: CacheStatus,
    /// Wall-clock time spent inside the gateway for this request.
    pub elapsed: Duration,
    /// Whether this request wrote the row. False on hits and on write conflicts.
    pub persisted: bool,
}

/// The only path by which articles enter or leave the cache.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn ArticleStore>,
    orchestrator: Arc<Orchestrator>,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn ArticleStore>, orchestrator: Arc<Orchestrator>) -> Self {
        Self { store, orchestrator }
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    /// A failing store reads as a miss so the request can still be served.
    async fn lookup(&self, url: &str) -> Option<ProcessedArticle> {
        match self.store.get(url).await {
            Ok(found) => found,
            Err(e) => {
                warn!("⚠️ Cache lookup failed for {}, treating as miss: {}", url, e);
                None
            }
        }
    }

    /// Writes never fail the request. Returns whether the row was written.
    async fn persist(&self, article: &ProcessedArticle) -> bool {
        match self.store.put(article).await {
            Ok(()) => {
                info!("💾 Cached {}", article.url);
                true
            }
            Err(e) if e.is_duplicate() => {
                info!("Article already cached by another request: {}", article.url);
                false
            }
            Err(e) => {
                warn!("⚠️ Could not cache {}: {}", article.url, e);
                false
            }
        }
    }

    /// Returns the stored article for `url` without computing anything.
    pub async fn cached(&self, url: &str) -> Option<GatewayResponse> {
        let started = Instant::now();
        let article = self.lookup(url).await?;
        info!("⚡ Cache hit: {}", url);
        Some(GatewayResponse {
            article,
            cache: CacheStatus::Hit,
            elapsed: started.elapsed(),
            persisted: false,
        })
    }

    pub async fn get_or_process(
        &self,
        raw: &RawArticle,
        force_refresh: bool,
        summary_max_length: usize,
    ) -> Result<GatewayResponse> {
        let started = Instant::now();

        let cache = if force_refresh {
            debug!("Bypassing cache for {}", raw.url);
            CacheStatus::Refreshed
        } else if let Some(article) = self.lookup(&raw.url).await {
            info!("⚡ Cache hit: {}", raw.url);
            return Ok(GatewayResponse {
                article,
                cache: CacheStatus::Hit,
                elapsed: started.elapsed(),
                persisted: false,
            });
        } else {
            info!("Cache miss: {}", raw.url);
            CacheStatus::Miss
        };

        let article = self.orchestrator.process(raw, summary_max_length).await?;
        let persisted = self.persist(&article).await;

        Ok(GatewayResponse {
            article,
            cache,
            elapsed: started.elapsed(),
            persisted,
        })
    }
}

impl fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheGateway")
            .field("store", &"<dyn ArticleStore>")
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
