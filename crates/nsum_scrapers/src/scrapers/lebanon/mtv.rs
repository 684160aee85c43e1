use nsum_core::{RawArticle, Result};
use scraper::Html;

use crate::scrapers::{Extracted, Scraper};
use crate::utils::{extract_lines, extract_text};

/// MTV Lebanon lays its report out as loose text separated by line breaks.
#[derive(Debug, Clone, Default)]
pub struct MtvLebanonScraper;

impl MtvLebanonScraper {
    pub fn new() -> Self {
        Self
    }
}

impl Scraper for MtvLebanonScraper {
    fn source(&self) -> &str {
        "MTV Lebanon"
    }

    fn domain(&self) -> &str {
        "mtv.com.lb"
    }

    fn parse(&self, url: &str, document: &Html) -> Result<RawArticle> {
        Extracted {
            title: extract_text(document, &["div.section-header-text", "div#title"])?,
            text: extract_lines(document, "div.articles-report")?,
            date: extract_text(document, &["div.articles-header-date"])?,
        }
        .into_article(url, self.source())
    }
}
