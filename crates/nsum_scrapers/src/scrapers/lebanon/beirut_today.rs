use nsum_core::{RawArticle, Result};
use scraper::Html;

use crate::scrapers::{Extracted, Scraper};
use crate::utils::{extract_paragraphs, extract_text};

#[derive(Debug, Clone, Default)]
pub struct BeirutTodayScraper;

impl BeirutTodayScraper {
    pub fn new() -> Self {
        Self
    }
}

impl Scraper for BeirutTodayScraper {
    fn source(&self) -> &str {
        "Beirut Today"
    }

    fn domain(&self) -> &str {
        "beirut-today.com"
    }

    fn parse(&self, url: &str, document: &Html) -> Result<RawArticle> {
        Extracted {
            title: extract_text(document, &["h1.title", "div#title"])?,
            text: extract_paragraphs(document, "div.entry-content")?,
            date: extract_text(document, &["time.entry-date"])?,
        }
        .into_article(url, self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_skips_share_links() {
        let page = r#"
            <h1 class="title">Climate issues are no longer ignorable</h1>
            <time class="entry-date" datetime="2025-08-06">August 6, 2025</time>
            <div class="entry-content">
              <p>Share on Facebook Share on Twitter</p>
              <p>Heatwaves and water shortages have become a yearly fixture in crisis-ridden Lebanon.</p>
              <p>Experts warn that   the state lacks a plan to adapt.   Read more about adaptation efforts.</p>
            </div>
        "#;
        let article = BeirutTodayScraper::new()
            .parse("https://beirut-today.com/2025/08/06/climate", &Html::parse_document(page))
            .unwrap();

        assert_eq!(article.title, "Climate issues are no longer ignorable");
        assert_eq!(article.date.as_deref(), Some("August 6, 2025"));
        assert_eq!(
            article.text,
            "Heatwaves and water shortages have become a yearly fixture in crisis-ridden Lebanon.\n\n\
             Experts warn that the state lacks a plan to adapt. Read more about adaptation efforts."
        );
    }
}
