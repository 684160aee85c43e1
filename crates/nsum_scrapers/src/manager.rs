use nsum_core::{Error, RawArticle, Result};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::scrapers::{get_scrapers, Scraper};

/// Routes article URLs to the site scraper that understands them.
pub struct ScraperManager {
    client: Client,
    config: ScraperConfig,
    scrapers: Vec<Box<dyn Scraper>>,
}

impl ScraperManager {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        Self::with_scrapers(config, get_scrapers())
    }

    pub fn with_scrapers(config: ScraperConfig, scrapers: Vec<Box<dyn Scraper>>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            config,
            scrapers,
        })
    }

    /// Names of the supported sources, in dispatch order.
    pub fn sources(&self) -> Vec<&str> {
        self.scrapers.iter().map(|s| s.source()).collect()
    }

    /// Source name and domain pairs.
    pub fn domains(&self) -> Vec<(&str, &str)> {
        self.scrapers.iter().map(|s| (s.source(), s.domain())).collect()
    }

    pub fn scraper_for_url(&self, url: &str) -> Result<&dyn Scraper> {
        self.scrapers
            .iter()
            .find(|s| s.can_handle(url))
            .map(|s| &**s)
            .ok_or_else(|| {
                Error::UnsupportedSource(format!(
                    "{} (supported sites: {})",
                    url,
                    self.sources().join(", ")
                ))
            })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        tokio::time::sleep(self.config.politeness_delay()).await;
        info!("🌐 Fetching: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetches and extracts one article, reporting why it failed.
    pub async fn scrape(&self, url: &str) -> Result<RawArticle> {
        Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL: {}", e)))?;
        let scraper = self.scraper_for_url(url)?;
        let html = self.fetch_html(url).await?;
        let document = Html::parse_document(&html);
        let article = scraper.parse(url, &document)?;
        debug!("Scraped {} chars from {}", article.text.len(), scraper.source());
        Ok(article)
    }

    /// Like [`ScraperManager::scrape`] but collapses every failure into `None`.
    pub async fn fetch(&self, url: &str) -> Option<RawArticle> {
        match self.scrape(url).await {
            Ok(article) => Some(article),
            Err(e) => {
                warn!("❌ No article from {}: {}", url, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for ScraperManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScraperManager")
            .field("config", &self.config)
            .field("sources", &self.sources())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ScraperManager {
        let config = ScraperConfig {
            politeness_delay_secs: 0,
            request_timeout_secs: 1,
            ..Default::default()
        };
        ScraperManager::new(config).unwrap()
    }

    #[test]
    fn test_sources() {
        assert_eq!(manager().sources(), vec!["Naharnet", "MTV Lebanon", "Beirut Today"]);
    }

    #[test]
    fn test_dispatch_by_domain() {
        let manager = manager();
        assert_eq!(
            manager
                .scraper_for_url("https://www.mtv.com.lb/en/news/International/1628094")
                .unwrap()
                .source(),
            "MTV Lebanon"
        );
        assert!(matches!(
            manager.scraper_for_url("https://www.bbc.com/news/1"),
            Err(Error::UnsupportedSource(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_site_produces_no_article() {
        let manager = manager();
        assert!(manager.fetch("https://www.bbc.com/news/1").await.is_none());
        assert!(matches!(
            manager.scrape("not a url").await,
            Err(Error::Scraping(_))
        ));
    }
}
