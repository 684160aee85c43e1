use nsum_core::{RawArticle, Result};
use scraper::Html;

use crate::scrapers::{Extracted, Scraper};
use crate::utils::{extract_paragraphs, extract_text};

#[derive(Debug, Clone, Default)]
pub struct NaharnetScraper;

impl NaharnetScraper {
    pub fn new() -> Self {
        Self
    }
}

impl Scraper for NaharnetScraper {
    fn source(&self) -> &str {
        "Naharnet"
    }

    fn domain(&self) -> &str {
        "naharnet.com"
    }

    fn parse(&self, url: &str, document: &Html) -> Result<RawArticle> {
        Extracted {
            title: extract_text(document, &["h1[itemprop=name]", "h1"])?,
            text: extract_paragraphs(document, "div[itemprop=description]")?,
            date: extract_text(document, &["abbr.timeago"])?,
        }
        .into_article(url, self.source())
    }
}
