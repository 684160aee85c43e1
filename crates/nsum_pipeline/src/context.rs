use std::sync::Arc;

use nsum_core::{ArticleStore, Error, Result};
use nsum_inference::{create_loader, InferenceConfig, ModelRegistry, PipelineConfig};
use nsum_scrapers::{ScraperConfig, ScraperManager};
use nsum_storage::{create_storage, StorageKind};
use tracing::{debug, info};

use crate::gateway::{CacheGateway, GatewayResponse};
use crate::orchestrator::Orchestrator;

/// Bounds for the user-facing summary length, in words.
pub const MIN_SUMMARY_WORDS: usize = 30;
pub const MAX_SUMMARY_WORDS: usize = 200;
pub const DEFAULT_SUMMARY_WORDS: usize = 100;

/// Everything needed to assemble a [`NewsSummarizer`].
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub storage: StorageKind,
    /// Database path for SQLite; ignored by the memory store.
    pub database: Option<String>,
    pub inference: InferenceConfig,
    pub pipeline: PipelineConfig,
    pub scraper: ScraperConfig,
}

/// Application context shared by the CLI and the web server: one store, one
/// model registry and one scraper client for the whole process.
#[derive(Debug)]
pub struct NewsSummarizer {
    gateway: CacheGateway,
    scrapers: ScraperManager,
}

impl NewsSummarizer {
    pub fn new(gateway: CacheGateway, scrapers: ScraperManager) -> Self {
        Self { gateway, scrapers }
    }

    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let store = create_storage(settings.storage, settings.database.as_deref()).await?;
        info!("💾 Storage ready ({})", settings.storage);

        let backend = settings.inference.backend;
        let models = Arc::new(ModelRegistry::new(create_loader(settings.inference)?));
        info!("🧠 Models will be loaded on first use ({})", backend);

        let orchestrator = Arc::new(Orchestrator::new(models, settings.pipeline));
        let scrapers = ScraperManager::new(settings.scraper)?;
        info!("🦗 Scrapers ready: {}", scrapers.sources().join(", "));

        Ok(Self::new(CacheGateway::new(store, orchestrator), scrapers))
    }

    pub fn gateway(&self) -> &CacheGateway {
        &self.gateway
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        self.gateway.store()
    }

    pub fn scrapers(&self) -> &ScraperManager {
        &self.scrapers
    }

    /// Converts a word budget to summarizer tokens, clamping it to the
    /// supported range first.
    pub fn summary_tokens(&self, words: Option<usize>) -> usize {
        let config = self.gateway.orchestrator().config();
        match words {
            Some(words) => {
                let clamped = words.clamp(MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS);
                if clamped != words {
                    debug!("Summary length {} words clamped to {}", words, clamped);
                }
                config.words_to_tokens(clamped)
            }
            None => config.summary_max_tokens,
        }
    }

    /// Scrapes `url` and runs it through the cache gateway.
    ///
    /// Without `force_refresh` a cached article is returned before any page
    /// is fetched.
    pub async fn summarize_url(
        &self,
        url: &str,
        force_refresh: bool,
        summary_words: Option<usize>,
    ) -> Result<GatewayResponse> {
        if !force_refresh {
            if let Some(response) = self.gateway.cached(url).await {
                return Ok(response);
            }
        }

        let raw = self.scrapers.fetch(url).await.ok_or_else(|| {
            Error::Scraping(format!(
                "Could not extract an article from {}. Supported sites: {}",
                url,
                self.scrapers.sources().join(", ")
            ))
        })?;

        self.gateway
            .get_or_process(&raw, force_refresh, self.summary_tokens(summary_words))
            .await
    }
}

#[cfg(test)]
mod tests {
    use nsum_inference::ModelBackend;

    use super::*;

    async fn summarizer() -> NewsSummarizer {
        NewsSummarizer::from_settings(Settings {
            storage: StorageKind::Memory,
            inference: InferenceConfig::new(ModelBackend::Dummy),
            scraper: ScraperConfig {
                politeness_delay_secs: 0,
                request_timeout_secs: 1,
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_summary_tokens() {
        let app = summarizer().await;
        assert_eq!(app.summary_tokens(Some(100)), 133);
        assert_eq!(app.summary_tokens(Some(5)), 39);
        assert_eq!(app.summary_tokens(Some(1000)), 266);
        assert_eq!(app.summary_tokens(None), 150);
    }

    #[tokio::test]
    async fn test_unsupported_site_is_reported() {
        let app = summarizer().await;
        let err = app
            .summarize_url("https://www.bbc.com/news/1", false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Scraping(_)));
        assert_eq!(app.store().stats().await.unwrap().total, 0);
    }
}
