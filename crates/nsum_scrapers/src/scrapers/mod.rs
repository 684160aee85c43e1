use nsum_core::{Error, RawArticle, Result};
use scraper::Html;
use tracing::debug;

pub mod lebanon;

pub use lebanon::{BeirutTodayScraper, MtvLebanonScraper, NaharnetScraper};

/// Per-site extraction. Fetching is done by the [`crate::ScraperManager`].
pub trait Scraper: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Domain fragment used to route URLs to this scraper
    fn domain(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool {
        url.contains(self.domain())
    }

    /// Pulls the article out of a fetched page
    fn parse(&self, url: &str, document: &Html) -> Result<RawArticle>;
}

/// Field values pulled from a page before validation.
#[derive(Debug, Default)]
pub(crate) struct Extracted {
    pub title: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
}

impl Extracted {
    /// A page without both a title and body text is not an article.
    pub fn into_article(self, url: &str, source: &str) -> Result<RawArticle> {
        match (self.title, self.text) {
            (Some(title), Some(text)) => {
                debug!(
                    "Extracted from {}: '{}' ({} chars)",
                    source,
                    title.chars().take(60).collect::<String>(),
                    text.chars().count()
                );
                Ok(RawArticle {
                    url: url.to_string(),
                    source: source.to_string(),
                    title,
                    text,
                    date: self.date,
                })
            }
            (title, text) => Err(Error::Scraping(format!(
                "Failed to extract from {} (title found: {}, text found: {})",
                source,
                title.is_some(),
                text.is_some()
            ))),
        }
    }
}

pub fn get_scrapers() -> Vec<Box<dyn Scraper>> {
    lebanon::get_scrapers()
}
